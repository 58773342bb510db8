//! Rose Pine Color Palettes
//! Based on the official Rose Pine theme: https://rosepinetheme.com/
//! The main variant is used for the dark theme, Dawn for the light one.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub surface: Color,
    pub text: Color,
    pub subtle: Color,
    pub muted: Color,
    pub love: Color,
    pub gold: Color,
    pub rose: Color,
    pub pine: Color,
    pub foam: Color,
    pub iris: Color,
    pub highlight_high: Color,
    pub highlight_low: Color,
}

pub struct RosePine;

impl RosePine {
    pub const MAIN: Palette = Palette {
        base: Color::Rgb(25, 23, 36),
        surface: Color::Rgb(31, 29, 46),
        text: Color::Rgb(224, 222, 244),
        subtle: Color::Rgb(144, 140, 170),
        muted: Color::Rgb(110, 106, 134),
        love: Color::Rgb(235, 111, 146),
        gold: Color::Rgb(246, 193, 119),
        rose: Color::Rgb(235, 188, 186),
        pine: Color::Rgb(49, 116, 143),
        foam: Color::Rgb(156, 207, 216),
        iris: Color::Rgb(196, 167, 231),
        highlight_high: Color::Rgb(82, 79, 103),
        highlight_low: Color::Rgb(33, 32, 46),
    };

    pub const DAWN: Palette = Palette {
        base: Color::Rgb(250, 244, 237),
        surface: Color::Rgb(255, 250, 243),
        text: Color::Rgb(87, 82, 121),
        subtle: Color::Rgb(121, 117, 147),
        muted: Color::Rgb(152, 147, 165),
        love: Color::Rgb(180, 99, 122),
        gold: Color::Rgb(234, 157, 52),
        rose: Color::Rgb(215, 130, 126),
        pine: Color::Rgb(40, 105, 131),
        foam: Color::Rgb(86, 148, 159),
        iris: Color::Rgb(144, 122, 169),
        highlight_high: Color::Rgb(206, 202, 205),
        highlight_low: Color::Rgb(244, 237, 232),
    };

    pub fn palette(dark: bool) -> Palette {
        if dark { Self::MAIN } else { Self::DAWN }
    }
}
