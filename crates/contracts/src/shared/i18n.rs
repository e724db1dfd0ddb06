//! Locales of the dashboard. Persian is the default and the URL prefix
//! decides the active one (`/fa/prices`, `/en/prices/papers`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fa,
    En,
    Fr,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Rtl,
    Ltr,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::Fa, Locale::En, Locale::Fr, Locale::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fa => "fa",
            Self::En => "en",
            Self::Fr => "fr",
            Self::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Self::Fa | Self::Ar => TextDirection::Rtl,
            Self::En | Self::Fr => TextDirection::Ltr,
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Fa => "فارسی",
            Self::En => "English",
            Self::Fr => "Français",
            Self::Ar => "العربية",
        }
    }

    /// Locale named by the first segment of a URL path, if any.
    pub fn from_path(path: &str) -> Option<Self> {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(Self::from_code)
    }

    /// `"/prices/papers"` → `"/fa/prices/papers"`.
    pub fn localize(&self, path: &str) -> String {
        format!("/{}/{}", self.code(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_persian_rtl() {
        assert_eq!(Locale::default(), Locale::Fa);
        assert_eq!(Locale::Fa.direction(), TextDirection::Rtl);
        assert_eq!(Locale::Ar.direction().as_str(), "rtl");
        assert_eq!(Locale::En.direction().as_str(), "ltr");
    }

    #[test]
    fn test_locale_from_path() {
        assert_eq!(Locale::from_path("/en/prices/papers"), Some(Locale::En));
        assert_eq!(Locale::from_path("/fa"), Some(Locale::Fa));
        assert_eq!(Locale::from_path("/prices"), None);
        assert_eq!(Locale::from_path("/"), None);
    }

    #[test]
    fn test_localize() {
        assert_eq!(Locale::Fr.localize("/prices/uvs"), "/fr/prices/uvs");
        assert_eq!(Locale::Fa.localize("prices"), "/fa/prices");
    }
}
