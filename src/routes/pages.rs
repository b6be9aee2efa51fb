use axum::{http::StatusCode, http::Uri, Json};
use serde::Serialize;

use super::{api_error, ApiError};

/// Every page of the app. Each path of the routing surface maps to exactly
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Menu,
    Calendar,
    Recipes,
    Inventory,
    Shopping,
    Diary,
    MenuDetails { id: String },
}

impl Page {
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let page = match trimmed {
            "" | "/menu" => Self::Menu,
            "/calendar" => Self::Calendar,
            "/recipes" => Self::Recipes,
            "/inventory" => Self::Inventory,
            "/shopping" => Self::Shopping,
            "/diary" => Self::Diary,
            other => {
                let id = other.strip_prefix("/menus/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::MenuDetails { id: id.to_string() }
            }
        };
        Some(page)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Menu => "Menus",
            Self::Calendar => "Meal Calendar",
            Self::Recipes => "Recipes",
            Self::Inventory => "Inventory",
            Self::Shopping => "Shopping List",
            Self::Diary => "Diary",
            Self::MenuDetails { .. } => "Menu",
        }
    }

    /// API endpoints the page loads its data from.
    pub fn endpoints(&self) -> Vec<String> {
        match self {
            Self::Menu => vec!["/api/menus".into()],
            Self::Calendar => vec!["/api/calendar".into(), "/api/menus".into()],
            Self::Recipes => vec!["/api/recipes".into()],
            Self::Shopping => vec!["/api/shopping".into()],
            Self::Inventory | Self::Diary => Vec::new(),
            Self::MenuDetails { id } => vec![format!("/api/menus/{id}")],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageDescriptor {
    #[serde(flatten)]
    pub page: Page,
    pub title: &'static str,
    pub endpoints: Vec<String>,
}

/// Describe the page behind a routing-surface path.
pub async fn show(uri: Uri) -> Result<Json<PageDescriptor>, ApiError> {
    let page = Page::from_path(uri.path())
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No page at {}", uri.path())))?;
    Ok(Json(PageDescriptor {
        title: page.title(),
        endpoints: page.endpoints(),
        page,
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_surface_path_has_one_page() {
        let cases = [
            ("/", Page::Menu),
            ("/menu", Page::Menu),
            ("/calendar", Page::Calendar),
            ("/recipes", Page::Recipes),
            ("/inventory", Page::Inventory),
            ("/shopping", Page::Shopping),
            ("/diary/", Page::Diary),
            ("/menus/abc123", Page::MenuDetails { id: "abc123".into() }),
        ];
        for (path, page) in cases {
            assert_eq!(Page::from_path(path), Some(page), "{path}");
        }
    }

    #[test]
    fn unknown_paths_have_no_page() {
        assert_eq!(Page::from_path("/menus/"), None);
        assert_eq!(Page::from_path("/menus/a/b"), None);
        assert_eq!(Page::from_path("/settings"), None);
    }
}
