use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub pie_colors: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Roboto, \"Helvetica Neue\", arial, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            axis_color: "#000000".to_string(),
            grid_color: "#CCCCCC".to_string(),
            pie_colors: default_pie_colors(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            axis_color: "#7A8AA6".to_string(),
            grid_color: "#E3E8F0".to_string(),
            pie_colors: vec![
                "#4E79A7".to_string(),
                "#F28E2C".to_string(),
                "#E15759".to_string(),
                "#76B7B2".to_string(),
                "#59A14F".to_string(),
                "#EDC949".to_string(),
                "#AF7AA1".to_string(),
                "#FF9DA7".to_string(),
                "#9C755F".to_string(),
                "#BAB0AB".to_string(),
            ],
        }
    }

    /// Bar fill color: the second palette entry, like the category series it shows.
    pub fn bar_color(&self) -> &str {
        self.pie_colors
            .get(1)
            .or_else(|| self.pie_colors.first())
            .map(String::as_str)
            .unwrap_or("#FF9800")
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

pub fn default_pie_colors() -> Vec<String> {
    [
        "#F44336", "#FF9800", "#FFEB3B", "#4CAF50", "#2196F3", "#3F51B5", "#9C27B0", "#E91E63",
        "#795548", "#607D8B",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}
