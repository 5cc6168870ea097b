use crate::catalog::{category_label, Category, Product, ProductId, CATEGORIES};
use crate::controller::{AdvisorController, AdvisorEvents, Effect};
use crate::conversation::markup::{Inline, Markup};
use crate::dnd::DropOutcome;
use crate::event::AppEvent;
use crate::render::{self, CatalogView, ChatView, Speaker, TrayView, ASSISTANT_LABEL};
use crate::services::Services;
use crate::theme::Theme;
use eframe::egui::{self, Align, FontId, Layout, RichText, ScrollArea};
use egui::text::{LayoutJob, TextFormat};
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::{debug, warn};

pub struct RoutineAdvisorApp {
    rx: Receiver<AppEvent>,
    services: Services,
    controller: AdvisorController,
    theme: Theme,
    selected_category: Option<Category>,
    input_buffer: String,
    visuals_applied: bool,
}

impl RoutineAdvisorApp {
    pub fn new(rx: Receiver<AppEvent>, services: Services, controller: AdvisorController) -> Self {
        Self {
            rx,
            services,
            controller,
            theme: Theme::default(),
            selected_category: None,
            input_buffer: String::new(),
            visuals_applied: false,
        }
    }

    fn run(&self, effect: Option<Effect>, ctx: &egui::Context) {
        if let Some(effect) = effect {
            let ctx = ctx.clone();
            self.services.execute(effect, move || ctx.request_repaint());
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.controller.apply(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    /// Mirrors egui's drag payload into the controller's drag state.
    fn sync_drag_state(&mut self, ctx: &egui::Context) {
        let payload = egui::DragAndDrop::payload::<ProductId>(ctx);
        match payload {
            Some(product_id) if !self.controller.is_dragging() => {
                self.controller.on_drag_start((*product_id).clone());
            }
            None if self.controller.is_dragging() => self.controller.on_drag_end(),
            _ => {}
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let mut changed: Option<Category> = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_8);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Smart Routine & Product Advisor").color(self.theme.accent_gold));
                ui.separator();
                let selected_text = self
                    .selected_category
                    .map(|category| category.label)
                    .unwrap_or("Choose a Category");
                egui::ComboBox::from_id_salt("category_filter")
                    .selected_text(selected_text)
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for category in CATEGORIES {
                            let is_selected = self.selected_category == Some(*category);
                            if ui.selectable_label(is_selected, category.label).clicked() {
                                changed = Some(*category);
                            }
                        }
                    });
            });
            ui.add_space(self.theme.spacing_8);
        });

        if let Some(category) = changed {
            self.selected_category = Some(category);
            let effect = self.controller.on_category_change(category.value);
            self.run(effect, ctx);
        }
    }

    fn render_catalog_panel(&mut self, ctx: &egui::Context) {
        let view = render::catalog_view(&self.controller);
        egui::SidePanel::left("catalog_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                let heading = match self.controller.active_category() {
                    Some(category) => category_label(category).to_string(),
                    None => "Products".to_string(),
                };
                ui.heading(heading);
                ui.separator();

                match &view {
                    CatalogView::Placeholder(text) => placeholder(ui, &self.theme, text),
                    CatalogView::Grid(products) => {
                        ScrollArea::vertical()
                            .id_salt("catalog_grid")
                            .auto_shrink([false; 2])
                            .show(ui, |ui| {
                                for product in products {
                                    let id = egui::Id::new(("catalog_card", product.id.as_str()));
                                    let response = ui
                                        .dnd_drag_source(id, product.id.clone(), |ui| {
                                            product_card(ui, &self.theme, product);
                                        })
                                        .response;
                                    response.on_hover_text(product.description.as_str());
                                    ui.add_space(self.theme.spacing_4);
                                }
                            });
                    }
                }
            });
    }

    fn render_tray_panel(&mut self, ctx: &egui::Context) {
        let view = render::tray_view(&self.controller);
        let mut removed: Option<ProductId> = None;
        let mut generate = false;

        egui::SidePanel::right("tray_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Selected Products");
                ui.separator();

                let frame = self.theme.tray_frame(self.controller.is_dragging());
                let (_, dropped) = ui.dnd_drop_zone::<ProductId, ()>(frame, |ui| {
                    ui.set_min_size(egui::vec2(ui.available_width(), self.theme.tray_min_height));
                    match &view {
                        TrayView::Placeholder(text) => placeholder(ui, &self.theme, text),
                        TrayView::Cards(products) => {
                            for product in products {
                                ui.horizontal(|ui| {
                                    let remove = ui
                                        .small_button("✕")
                                        .on_hover_text(format!("Remove {}", product.name));
                                    if remove.clicked() {
                                        removed = Some(product.id.clone());
                                    }
                                    product_card(ui, &self.theme, product)
                                        .on_hover_text(product.description.as_str());
                                });
                            }
                        }
                    }
                });

                if let Some(product_id) = dropped {
                    match self.controller.on_drop(product_id.as_str()) {
                        DropOutcome::Added(id) => debug!(%id, "drop accepted"),
                        DropOutcome::AlreadySelected(_) | DropOutcome::InvalidDrop(_) => {}
                    }
                }

                ui.add_space(self.theme.spacing_12);
                let button = egui::Button::new(
                    RichText::new("✨ Generate Routine").color(self.theme.text_on_accent),
                )
                .fill(self.theme.accent_rose);
                if ui
                    .add_sized([ui.available_width(), self.theme.button_height], button)
                    .clicked()
                {
                    generate = true;
                }
            });

        if let Some(product_id) = removed {
            self.controller.on_remove(&product_id);
        }
        if generate {
            let effect = self.controller.on_generate_routine();
            self.run(effect, ctx);
        }
    }

    fn render_chat_panel(&mut self, ctx: &egui::Context) {
        let view = render::chat_view(&self.controller);
        let mut send_now = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chat");
            ui.separator();

            let transcript_height = (ui.available_height() - 90.0).max(120.0);
            ScrollArea::vertical()
                .id_salt("chat_transcript")
                .max_height(transcript_height)
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| match &view {
                    ChatView::Notice(text) => placeholder(ui, &self.theme, text),
                    ChatView::Conversation { bubbles, typing } => {
                        let max_width = ui.available_width() * 0.8;
                        for bubble in bubbles {
                            let layout = match bubble.speaker {
                                Speaker::User => Layout::right_to_left(Align::TOP),
                                Speaker::Assistant => Layout::left_to_right(Align::TOP),
                            };
                            ui.with_layout(layout, |ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        RichText::new(bubble.label)
                                            .color(self.theme.text_muted)
                                            .small(),
                                    );
                                    self.theme.bubble_frame(bubble.speaker).show(ui, |ui| {
                                        ui.set_max_width(max_width);
                                        ui.label(markup_job(&bubble.body, &self.theme, max_width));
                                    });
                                });
                            });
                            ui.add_space(self.theme.spacing_8);
                        }
                        if *typing {
                            ui.label(
                                RichText::new(ASSISTANT_LABEL)
                                    .color(self.theme.text_muted)
                                    .small(),
                            );
                            ui.horizontal(|ui| {
                                ui.add(egui::Spinner::new());
                                ui.label(RichText::new("typing...").color(self.theme.text_muted));
                            });
                        }
                    }
                });

            ui.add_space(self.theme.spacing_8);
            self.theme.composer_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.input_buffer)
                            .desired_width(ui.available_width() - 80.0)
                            .hint_text("Ask me about products or routines..."),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }
                    send_now |= ui.button("Send").clicked();
                });
            });
        });

        if send_now {
            let effect = self.controller.on_chat_submit(&self.input_buffer);
            if effect.is_some() {
                self.input_buffer.clear();
            }
            self.run(effect, ctx);
        }
    }
}

impl eframe::App for RoutineAdvisorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_applied {
            self.theme.apply_visuals(ctx);
            self.visuals_applied = true;
        }
        self.drain_events();
        self.sync_drag_state(ctx);
        self.render_top_bar(ctx);
        self.render_catalog_panel(ctx);
        self.render_tray_panel(ctx);
        self.render_chat_panel(ctx);
    }
}

fn placeholder(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    ui.add_space(theme.spacing_16);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(text).color(theme.text_muted).italics());
    });
}

fn product_card(ui: &mut egui::Ui, theme: &Theme, product: &Product) -> egui::Response {
    theme
        .card_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&product.name).strong().color(theme.text_primary));
            ui.label(RichText::new(&product.brand).color(theme.text_muted).small());
        })
        .response
}

fn markup_job(markup: &Markup, theme: &Theme, max_width: f32) -> LayoutJob {
    let body = TextFormat {
        font_id: FontId::proportional(14.0),
        color: theme.text_primary,
        ..Default::default()
    };
    let strong = TextFormat {
        color: theme.accent_gold,
        ..body.clone()
    };

    let mut job = LayoutJob::default();
    job.wrap.max_width = max_width;
    for inline in &markup.inlines {
        match inline {
            Inline::Text(text) => job.append(text, 0.0, body.clone()),
            Inline::Strong(text) => job.append(text, 0.0, strong.clone()),
            Inline::Break => job.append("\n", 0.0, body.clone()),
        }
    }
    job
}
