use ratatui::style::{Color, Modifier, Style};

/// Selectable color schemes (`c` cycles through them)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSchemeId {
    Default = 0,
    Monochrome = 1,
    LightTerminal = 2,
    DarkVivid = 3,
}

impl ColorSchemeId {
    pub fn all() -> &'static [ColorSchemeId] {
        &[
            ColorSchemeId::Default,
            ColorSchemeId::Monochrome,
            ColorSchemeId::LightTerminal,
            ColorSchemeId::DarkVivid,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorSchemeId::Default => "Default",
            ColorSchemeId::Monochrome => "Monochrome",
            ColorSchemeId::LightTerminal => "Light Terminal",
            ColorSchemeId::DarkVivid => "Dark Vivid",
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => ColorSchemeId::Default,
            1 => ColorSchemeId::Monochrome,
            2 => ColorSchemeId::LightTerminal,
            3 => ColorSchemeId::DarkVivid,
            _ => ColorSchemeId::Default,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index((self as usize + 1) % Self::all().len())
    }
}

/// All color slots used across the app
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub title: Color,
    pub axis: Color,

    // Chart series
    pub download: Color,
    pub upload: Color,
    pub ping: Color,
    pub loss: Color,

    // Status line
    pub status_fg: Color,
    pub status_idle: Color,
    pub alert_fg: Color,
    pub alert_bg: Color,

    // Controls row
    pub control_label: Color,
    pub control_value: Color,
    pub control_edit_bg: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_disabled_fg: Color,
    pub button_disabled_bg: Color,

    // Footer
    pub footer_key_fg: Color,
    pub footer_key_bg: Color,
    pub footer_label_fg: Color,
    pub footer_label_bg: Color,

    // Popups
    pub popup_border: Color,
    pub popup_bg: Color,
    pub popup_title: Color,
    pub popup_text: Color,
}

impl ColorScheme {
    pub fn from_id(id: ColorSchemeId) -> Self {
        match id {
            ColorSchemeId::Default => Self::default_scheme(),
            ColorSchemeId::Monochrome => Self::monochrome(),
            ColorSchemeId::LightTerminal => Self::light_terminal(),
            ColorSchemeId::DarkVivid => Self::dark_vivid(),
        }
    }

    /// Dark theme: #1e1e1e background, blue/orange throughput, green/red ping/loss
    fn default_scheme() -> Self {
        Self {
            bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            fg: Color::Rgb(0xe6, 0xe6, 0xe6),
            border: Color::Indexed(240),
            title: Color::Rgb(0xe6, 0xe6, 0xe6),
            axis: Color::Indexed(245),

            download: Color::Rgb(0x00, 0xa2, 0xff),
            upload: Color::Rgb(0xff, 0x8c, 0x00),
            ping: Color::Rgb(0x00, 0xff, 0x7f),
            loss: Color::Rgb(0xff, 0x40, 0x40),

            status_fg: Color::Rgb(0xe6, 0xe6, 0xe6),
            status_idle: Color::Indexed(245),
            alert_fg: Color::Rgb(0xff, 0x40, 0x40),
            alert_bg: Color::Rgb(0x1e, 0x1e, 0x1e),

            control_label: Color::Rgb(0xe6, 0xe6, 0xe6),
            control_value: Color::Cyan,
            control_edit_bg: Color::Indexed(238),
            button_fg: Color::White,
            button_bg: Color::Rgb(0x00, 0x78, 0xd4),
            button_disabled_fg: Color::Indexed(245),
            button_disabled_bg: Color::Indexed(237),

            footer_key_fg: Color::Black,
            footer_key_bg: Color::Cyan,
            footer_label_fg: Color::Indexed(252),
            footer_label_bg: Color::Indexed(234),

            popup_border: Color::Cyan,
            popup_bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            popup_title: Color::Cyan,
            popup_text: Color::Rgb(0xe6, 0xe6, 0xe6),
        }
    }

    fn monochrome() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::White,
            title: Color::White,
            axis: Color::Gray,

            download: Color::White,
            upload: Color::Gray,
            ping: Color::White,
            loss: Color::Gray,

            status_fg: Color::White,
            status_idle: Color::Gray,
            alert_fg: Color::Black,
            alert_bg: Color::White,

            control_label: Color::White,
            control_value: Color::White,
            control_edit_bg: Color::DarkGray,
            button_fg: Color::Black,
            button_bg: Color::White,
            button_disabled_fg: Color::Gray,
            button_disabled_bg: Color::Reset,

            footer_key_fg: Color::Black,
            footer_key_bg: Color::White,
            footer_label_fg: Color::White,
            footer_label_bg: Color::Reset,

            popup_border: Color::White,
            popup_bg: Color::Reset,
            popup_title: Color::White,
            popup_text: Color::White,
        }
    }

    fn light_terminal() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Black,
            border: Color::DarkGray,
            title: Color::Black,
            axis: Color::DarkGray,

            download: Color::Blue,
            upload: Color::Rgb(0xc0, 0x60, 0x00),
            ping: Color::Rgb(0x00, 0x80, 0x40),
            loss: Color::Red,

            status_fg: Color::Black,
            status_idle: Color::DarkGray,
            alert_fg: Color::White,
            alert_bg: Color::Red,

            control_label: Color::Black,
            control_value: Color::Blue,
            control_edit_bg: Color::Indexed(252),
            button_fg: Color::White,
            button_bg: Color::Blue,
            button_disabled_fg: Color::DarkGray,
            button_disabled_bg: Color::Indexed(252),

            footer_key_fg: Color::White,
            footer_key_bg: Color::Blue,
            footer_label_fg: Color::Black,
            footer_label_bg: Color::Indexed(253),

            popup_border: Color::Blue,
            popup_bg: Color::Reset,
            popup_title: Color::Blue,
            popup_text: Color::Black,
        }
    }

    fn dark_vivid() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Magenta,
            title: Color::LightCyan,
            axis: Color::Indexed(250),

            download: Color::LightCyan,
            upload: Color::LightYellow,
            ping: Color::LightGreen,
            loss: Color::LightRed,

            status_fg: Color::White,
            status_idle: Color::Indexed(245),
            alert_fg: Color::Black,
            alert_bg: Color::LightRed,

            control_label: Color::White,
            control_value: Color::LightCyan,
            control_edit_bg: Color::Indexed(236),
            button_fg: Color::Black,
            button_bg: Color::LightGreen,
            button_disabled_fg: Color::Indexed(245),
            button_disabled_bg: Color::Indexed(236),

            footer_key_fg: Color::Black,
            footer_key_bg: Color::LightMagenta,
            footer_label_fg: Color::White,
            footer_label_bg: Color::Black,

            popup_border: Color::LightMagenta,
            popup_bg: Color::Black,
            popup_title: Color::LightCyan,
            popup_text: Color::White,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn alert(&self) -> Style {
        Style::default()
            .fg(self.alert_fg)
            .bg(self.alert_bg)
            .add_modifier(Modifier::BOLD)
    }
}
