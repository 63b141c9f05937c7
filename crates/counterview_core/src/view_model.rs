use crate::Surface;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub surface: Surface,
    pub is_loading: bool,
    /// Always the negation of `is_loading`.
    pub submit_enabled: bool,
    pub loading_label: Option<String>,
    pub summary: Option<String>,
    pub links: Vec<LinkView>,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub href: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Open in a new tab/window, leaving the current view in place.
    NewContext,
}
