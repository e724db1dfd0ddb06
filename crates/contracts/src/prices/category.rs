use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price-list categories served under `/client/offset/{slug}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Papers,
    Uvs,
    Cuts,
    Lithographies,
    Monitorings,
    Colors,
    Circulations,
    Selefons,
    Laminates,
    Boxes,
    Pockets,
    Bags,
    Binderies,
    Framings,
    Plates,
    Golds,
    Letterpress,
    Glues,
    Numerations,
    Perforages,
    Others,
}

/// Sidebar grouping of the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavGroup {
    /// Listed directly under the price tables heading.
    Root,
    Offset,
    Covers,
    Box,
    Finishing,
}

impl NavGroup {
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::Offset => Some("افست"),
            Self::Covers => Some("روکش‌ها"),
            Self::Box => Some("جعبه"),
            Self::Finishing => Some("تکمیلی"),
        }
    }
}

/// Sidebar layout: `(group, categories)` in menu order. Root entries are
/// split around the groups so the menu reads top to bottom.
pub fn navigation() -> Vec<(NavGroup, Vec<PriceCategory>)> {
    use PriceCategory::*;
    vec![
        (NavGroup::Root, vec![Papers, Lithographies, Monitorings]),
        (NavGroup::Offset, vec![Colors, Circulations]),
        (NavGroup::Covers, vec![Uvs, Selefons, Laminates]),
        (NavGroup::Box, vec![Boxes, Pockets, Bags]),
        (NavGroup::Root, vec![Binderies]),
        (
            NavGroup::Finishing,
            vec![Framings, Plates, Golds, Letterpress, Cuts, Glues, Numerations, Perforages],
        ),
        (NavGroup::Root, vec![Others]),
    ]
}

impl PriceCategory {
    /// Overview page order.
    pub const ALL: [PriceCategory; 21] = [
        PriceCategory::Papers,
        PriceCategory::Uvs,
        PriceCategory::Cuts,
        PriceCategory::Lithographies,
        PriceCategory::Monitorings,
        PriceCategory::Colors,
        PriceCategory::Circulations,
        PriceCategory::Selefons,
        PriceCategory::Laminates,
        PriceCategory::Boxes,
        PriceCategory::Pockets,
        PriceCategory::Bags,
        PriceCategory::Binderies,
        PriceCategory::Framings,
        PriceCategory::Plates,
        PriceCategory::Golds,
        PriceCategory::Letterpress,
        PriceCategory::Glues,
        PriceCategory::Numerations,
        PriceCategory::Perforages,
        PriceCategory::Others,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Papers => "papers",
            Self::Uvs => "uvs",
            Self::Cuts => "cuts",
            Self::Lithographies => "lithographies",
            Self::Monitorings => "monitorings",
            Self::Colors => "colors",
            Self::Circulations => "circulations",
            Self::Selefons => "selefons",
            Self::Laminates => "laminates",
            Self::Boxes => "boxes",
            Self::Pockets => "pockets",
            Self::Bags => "bags",
            Self::Binderies => "binderies",
            Self::Framings => "framings",
            Self::Plates => "plates",
            Self::Golds => "golds",
            Self::Letterpress => "letterpress",
            Self::Glues => "glues",
            Self::Numerations => "numerations",
            Self::Perforages => "perforages",
            Self::Others => "others",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Papers => "قیمت کاغذ",
            Self::Uvs => "قیمت UV",
            Self::Cuts => "قیمت برش",
            Self::Lithographies => "قیمت لیتوگرافی",
            Self::Monitorings => "قیمت نظارت",
            Self::Colors => "قیمت ماشین افست",
            Self::Circulations => "قیمت تیراژ افست",
            Self::Selefons => "قیمت سلفون",
            Self::Laminates => "قیمت لمینیت",
            Self::Boxes => "قیمت جعبه",
            Self::Pockets => "قیمت بسته‌بندی",
            Self::Bags => "قیمت کیسه",
            Self::Binderies => "قیمت صحافی",
            Self::Framings => "قیمت قالب‌سازی",
            Self::Plates => "قیمت کلیشه‌سازی",
            Self::Golds => "قیمت طلاکوب",
            Self::Letterpress => "قیمت چاپ لترپرس",
            Self::Glues => "قیمت سرچسب",
            Self::Numerations => "قیمت شماره‌زنی",
            Self::Perforages => "قیمت پرفراژ",
            Self::Others => "سایر قیمت‌ها",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Papers => "مدیریت قیمت انواع کاغذ و مقوا",
            Self::Uvs => "مدیریت قیمت UV و پوشش‌های محافظ",
            Self::Cuts => "مدیریت قیمت انواع برش و بریدگی",
            Self::Lithographies => "مدیریت قیمت چاپ لیتوگرافی",
            Self::Monitorings => "مدیریت قیمت نظارت و بازرسی",
            Self::Colors => "مدیریت قیمت ماشین‌های افست",
            Self::Circulations => "مدیریت قیمت بر اساس تیراژ",
            Self::Selefons => "مدیریت قیمت سلفون و روکش",
            Self::Laminates => "مدیریت قیمت لمینیت و پوشش",
            Self::Boxes => "مدیریت قیمت انواع جعبه و بسته‌بندی",
            Self::Pockets => "مدیریت قیمت انواع بسته‌بندی",
            Self::Bags => "مدیریت قیمت انواع کیسه و ساک",
            Self::Binderies => "مدیریت قیمت انواع صحافی",
            Self::Framings => "مدیریت قیمت ساخت قالب",
            Self::Plates => "مدیریت قیمت ساخت کلیشه",
            Self::Golds => "مدیریت قیمت طلاکوب و نقره‌کوب",
            Self::Letterpress => "مدیریت قیمت چاپ لترپرس",
            Self::Glues => "مدیریت قیمت انواع برچسب",
            Self::Numerations => "مدیریت قیمت شماره‌زنی",
            Self::Perforages => "مدیریت قیمت پرفراژ و سوراخ‌کاری",
            Self::Others => "مدیریت سایر خدمات و قیمت‌ها",
        }
    }

    /// Tabler icon class.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Papers => "tabler-file-text",
            Self::Uvs => "tabler-sun",
            Self::Cuts => "tabler-cut",
            Self::Lithographies => "tabler-print",
            Self::Monitorings => "tabler-eye",
            Self::Colors => "tabler-palette",
            Self::Circulations => "tabler-copy",
            Self::Selefons => "tabler-layers",
            Self::Laminates => "tabler-layers-intersect",
            Self::Boxes => "tabler-box",
            Self::Pockets => "tabler-package",
            Self::Bags => "tabler-shopping-bag",
            Self::Binderies => "tabler-book",
            Self::Framings => "tabler-frame",
            Self::Plates => "tabler-stamp",
            Self::Golds => "tabler-star",
            Self::Letterpress => "tabler-typography",
            Self::Glues => "tabler-sticker",
            Self::Numerations => "tabler-numbers",
            Self::Perforages => "tabler-dots",
            Self::Others => "tabler-dots-vertical",
        }
    }

    /// Accent used by the overview cards (`primary`, `warning`, ...).
    pub fn color(&self) -> &'static str {
        match self {
            Self::Papers | Self::Circulations | Self::Binderies | Self::Perforages => "primary",
            Self::Uvs | Self::Selefons | Self::Framings | Self::Golds => "warning",
            Self::Cuts | Self::Pockets | Self::Letterpress => "error",
            Self::Lithographies | Self::Laminates | Self::Plates | Self::Others => "info",
            Self::Monitorings | Self::Boxes | Self::Glues => "success",
            Self::Colors | Self::Bags | Self::Numerations => "secondary",
        }
    }

    pub fn needs_range_selector(&self) -> bool {
        matches!(
            self,
            Self::Monitorings | Self::Boxes | Self::Golds | Self::Cuts | Self::Glues
        )
    }

    pub fn needs_box_type_selector(&self) -> bool {
        matches!(self, Self::Boxes)
    }

    pub fn needs_bindery_type_selector(&self) -> bool {
        matches!(self, Self::Binderies)
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown price category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for PriceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slug_roundtrip_for_every_category() {
        for category in PriceCategory::ALL {
            assert_eq!(category.slug().parse::<PriceCategory>(), Ok(category));
        }
        assert!("bindings".parse::<PriceCategory>().is_err());
    }

    #[test]
    fn test_navigation_lists_each_category_once() {
        let listed: Vec<PriceCategory> = navigation()
            .into_iter()
            .flat_map(|(_, categories)| categories)
            .collect();
        let unique: HashSet<_> = listed.iter().copied().collect();
        assert_eq!(listed.len(), PriceCategory::ALL.len());
        assert_eq!(unique.len(), PriceCategory::ALL.len());
    }

    #[test]
    fn test_selector_predicates() {
        let with_range: Vec<_> = PriceCategory::ALL
            .into_iter()
            .filter(|c| c.needs_range_selector())
            .collect();
        assert_eq!(
            with_range,
            vec![
                PriceCategory::Cuts,
                PriceCategory::Monitorings,
                PriceCategory::Boxes,
                PriceCategory::Golds,
                PriceCategory::Glues,
            ]
        );
        assert!(PriceCategory::Boxes.needs_box_type_selector());
        assert!(!PriceCategory::Binderies.needs_box_type_selector());
        assert!(PriceCategory::Binderies.needs_bindery_type_selector());
    }
}
