use crossterm::style::Color;

/// Colors used when printing grids and results
#[derive(Debug, Clone)]
pub struct Theme {
    /// Unmarked cell dots
    pub empty: Color,
    /// Marked cell with no letter yet
    pub marked: Color,
    /// Letter fixed in the grid before solving
    pub fixed: Color,
    /// Letter placed by the solver
    pub solved: Color,
    /// Cell visited more than once by the path
    pub crossing: Color,
    /// Path order digits
    pub order: Color,
    /// Failure messages
    pub error: Color,
    /// Success messages
    pub success: Color,
    /// Secondary text
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            empty: Color::Rgb { r: 70, g: 75, b: 90 },
            marked: Color::Rgb { r: 140, g: 150, b: 180 },
            fixed: Color::Rgb { r: 255, g: 255, b: 255 },
            solved: Color::Rgb { r: 100, g: 180, b: 255 },
            crossing: Color::Rgb { r: 255, g: 210, b: 100 },
            order: Color::Rgb { r: 160, g: 165, b: 185 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            empty: Color::DarkGrey,
            marked: Color::Grey,
            fixed: Color::White,
            solved: Color::Cyan,
            crossing: Color::Yellow,
            order: Color::Grey,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
        }
    }
}
