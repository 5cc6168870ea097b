use crate::render::Speaker;
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub surface_3: Color32,
    pub accent_rose: Color32,
    pub accent_rose_muted: Color32,
    pub accent_gold: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub drop_highlight: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub button_height: f32,
    pub tray_min_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0x14, 0x10, 0x12),
            surface_1: Color32::from_rgb(0x1C, 0x16, 0x19),
            surface_2: Color32::from_rgb(0x26, 0x1E, 0x22),
            surface_3: Color32::from_rgb(0x31, 0x27, 0x2C),
            accent_rose: Color32::from_rgb(0xE3, 0x6F, 0x8E),
            accent_rose_muted: Color32::from_rgb(0xB8, 0x52, 0x6E),
            accent_gold: Color32::from_rgb(0xD4, 0xAF, 0x6A),
            text_primary: Color32::from_rgb(0xF4, 0xEC, 0xEF),
            text_muted: Color32::from_rgb(0xA8, 0x98, 0x9F),
            text_on_accent: Color32::from_rgb(0xFF, 0xF8, 0xFA),
            border_subtle: Color32::from_rgba_premultiplied(255, 255, 255, 13),
            drop_highlight: Color32::from_rgba_premultiplied(0xE3, 0x6F, 0x8E, 60),
            user_bubble: Color32::from_rgb(0x5A, 0x2B, 0x3A),
            assistant_bubble: Color32::from_rgb(0x2A, 0x22, 0x26),
            spacing_4: 4.0,
            spacing_8: Self::P8,
            spacing_12: Self::P12,
            spacing_16: Self::P16,
            radius_8: Self::R8,
            radius_12: Self::R12,
            button_height: 36.0,
            tray_min_height: 160.0,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R12: u8 = 12;
    pub const P8: f32 = 8.0;
    pub const P12: f32 = 12.0;
    pub const P16: f32 = 16.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.surface_1;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_2;
        visuals.widgets.noninteractive.weak_bg_fill = self.surface_2;
        visuals.widgets.noninteractive.bg_stroke = Stroke::NONE;
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.hovered.bg_fill = self.surface_3;
        visuals.widgets.hovered.weak_bg_fill = self.surface_3;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_rose_muted);
        visuals.widgets.active.bg_fill = self.accent_rose_muted;
        visuals.widgets.active.bg_stroke = Stroke::NONE;
        visuals.selection.bg_fill = self.accent_rose_muted;
        visuals.hyperlink_color = self.accent_gold;
        visuals.window_fill = self.surface_1;
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(20.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::NONE)
    }

    pub fn card_frame(&self) -> Frame {
        self.panel_frame(self.surface_2, self.spacing_12 as i8)
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    /// Selection tray. Highlighted while a product is being dragged.
    pub fn tray_frame(&self, drag_active: bool) -> Frame {
        let (fill, stroke) = if drag_active {
            (self.drop_highlight, Stroke::new(2.0, self.accent_rose))
        } else {
            (self.surface_0, Stroke::new(1.0, self.border_subtle))
        };
        self.panel_frame(fill, self.spacing_12 as i8).stroke(stroke)
    }

    pub fn bubble_frame(&self, speaker: Speaker) -> Frame {
        let fill = match speaker {
            Speaker::User => self.user_bubble,
            Speaker::Assistant => self.assistant_bubble,
        };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(self.spacing_12 as i8, self.spacing_8 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_2)
            .inner_margin(Margin::symmetric(self.spacing_12 as i8, 10))
            .corner_radius(CornerRadius::same(self.radius_8))
    }
}
