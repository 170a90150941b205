//! Color palettes for the invitations

use ratatui::style::Color;

use crate::flow::FlowKind;

/// A color theme for one invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub error: Color,

    // UI elements
    pub border: Color,
}

impl Theme {
    /// Sage green and burgundy on off-white
    pub const WEDDING: Theme = Theme {
        name: "Sage & Burgundy",
        bg_primary: Color::Rgb(248, 245, 238),     // #f8f5ee
        bg_secondary: Color::Rgb(232, 228, 216),   // #e8e4d8
        fg_primary: Color::Rgb(128, 0, 32),        // #800020
        fg_secondary: Color::Rgb(88, 44, 52),      // #582c34
        fg_muted: Color::Rgb(140, 130, 120),       // #8c8278
        accent_primary: Color::Rgb(156, 175, 136), // #9caf88
        accent_secondary: Color::Rgb(191, 155, 48), // #bf9b30
        error: Color::Rgb(180, 40, 40),            // #b42828
        border: Color::Rgb(156, 175, 136),         // #9caf88
    };

    /// Night sky with warm gold
    pub const QUINCE: Theme = Theme {
        name: "Vaquero Night",
        bg_primary: Color::Rgb(24, 20, 32),         // #181420
        bg_secondary: Color::Rgb(44, 36, 56),       // #2c2438
        fg_primary: Color::Rgb(245, 240, 230),      // #f5f0e6
        fg_secondary: Color::Rgb(214, 200, 180),    // #d6c8b4
        fg_muted: Color::Rgb(130, 120, 140),        // #82788c
        accent_primary: Color::Rgb(222, 184, 135),  // #deb887
        accent_secondary: Color::Rgb(205, 133, 63), // #cd853f
        error: Color::Rgb(247, 118, 142),           // #f7768e
        border: Color::Rgb(120, 100, 90),           // #78645a
    };

    pub fn for_flow(kind: FlowKind) -> Theme {
        match kind {
            FlowKind::Wedding => Self::WEDDING,
            FlowKind::Quince => Self::QUINCE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::WEDDING
    }
}
