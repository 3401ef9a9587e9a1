use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Product, Variant},
    filter::{BoundField, FilterBounds},
    rating::{display_value, Rating},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::carousel::CarouselState;
use crate::controller::catalog::CatalogFetchState;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::selection::SelectionMap;

const CARD_WIDTH: f32 = 220.0;
const CARD_GAP: f32 = 40.0;
const SWATCH_RADIUS: f32 = 8.0;

const STAR_FULL_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFD, 0xBA, 0x74);
const STAR_HALF_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFD, 0xE6, 0x8A);
const STAR_EMPTY_COLOR: egui::Color32 = egui::Color32::from_rgb(0xD1, 0xD5, 0xDB);

enum CardImageState {
    Loading,
    Ready {
        texture: egui::TextureHandle,
        size: egui::Vec2,
    },
    Failed,
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    filters: FilterBounds,
    fetch: CatalogFetchState,
    selection: SelectionMap,
    carousel: CarouselState,

    card_images: HashMap<String, CardImageState>,
    // Forces the carousel offset into the viewport for one frame, e.g. the
    // jump-to-start after a list refresh.
    scroll_write_pending: bool,

    status: String,
}

impl CatalogApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            filters: FilterBounds::default(),
            fetch: CatalogFetchState::new(),
            selection: SelectionMap::new(),
            carousel: CarouselState::new(),
            card_images: HashMap::new(),
            scroll_write_pending: false,
            status: "Connecting to catalog service...".to_string(),
        };
        // The catalog loads once at startup with no bounds, like any later
        // filter-driven fetch.
        app.issue_fetch();
        app
    }

    fn issue_fetch(&mut self) {
        let request_seq = self.fetch.begin_fetch();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCatalog {
                request_seq,
                query: self.filters.to_query(),
            },
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.status = err.message().to_string();
                }
                UiEvent::CatalogLoaded {
                    request_seq,
                    products,
                } => {
                    if self.fetch.commit(request_seq, products) {
                        self.carousel.reset_offset();
                        self.scroll_write_pending = true;
                        self.status = format!("{} products", self.fetch.products().len());
                    }
                }
                UiEvent::CatalogFetchFailed {
                    request_seq,
                    reason,
                } => {
                    if self.fetch.fail(request_seq) {
                        self.status = format!("Catalog fetch failed: {reason}");
                    }
                }
                UiEvent::CardImageLoaded { url, image } => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    let texture = ctx.load_texture(
                        format!("card-image:{url}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    let size = egui::vec2(image.width as f32, image.height as f32);
                    self.card_images
                        .insert(url, CardImageState::Ready { texture, size });
                }
                UiEvent::CardImageFailed { url, reason } => {
                    tracing::warn!("card image unavailable for {url}: {reason}");
                    self.card_images.insert(url, CardImageState::Failed);
                }
            }
        }
    }

    fn show_filter_bar(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            for (field, label, hint) in [
                (BoundField::MinPopularity, "Min Popularity", "0.0"),
                (BoundField::MaxPopularity, "Max Popularity", "1.0"),
                (BoundField::MinPrice, "Min Price", "0"),
                (BoundField::MaxPrice, "Max Price", ""),
            ] {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(label).size(11.0).weak());
                    let mut text = self.filters.bound(field).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut text)
                            .desired_width(90.0)
                            .hint_text(hint),
                    );
                    if response.changed() {
                        self.filters.set_bound(field, sanitize_numeric_text(&text));
                        changed = true;
                    }
                });
            }
            ui.add_space(8.0);
            if ui.button("Reset").clicked() {
                self.filters.reset();
                changed = true;
            }
        });
        if changed {
            self.issue_fetch();
        }
    }

    fn show_carousel(&mut self, ui: &mut egui::Ui) {
        if self.fetch.is_loading() {
            self.centered_notice(ui, "Loading...");
            return;
        }
        if self.fetch.products().is_empty() {
            self.centered_notice(ui, "No products found");
            return;
        }

        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new(egui::RichText::new("<").size(28.0)).frame(false))
                .clicked()
            {
                self.carousel.step_previous();
            }

            let drive_offset = self.scroll_write_pending
                || self.carousel.is_dragging()
                || self.carousel.animation_target().is_some();
            let mut scroll_area = egui::ScrollArea::horizontal()
                .id_salt("product-carousel")
                .auto_shrink([false, true]);
            if drive_offset {
                scroll_area = scroll_area.scroll_offset(egui::vec2(self.carousel.offset(), 0.0));
            }

            let available = ui.available_width() - 40.0;
            let scroll_out = ui
                .scope(|ui| {
                    ui.set_max_width(available.max(CARD_WIDTH));
                    scroll_area.show(ui, |ui| {
                        ui.spacing_mut().item_spacing.x = CARD_GAP;
                        ui.horizontal(|ui| {
                            let products: Vec<Product> = self.fetch.products().to_vec();
                            for (idx, product) in products.iter().enumerate() {
                                self.product_card(ui, idx, product);
                            }
                        });
                    })
                })
                .inner;
            self.scroll_write_pending = false;

            let viewport = scroll_out.inner_rect;
            let drag_response = ui.interact(
                viewport,
                egui::Id::new("carousel-drag"),
                egui::Sense::drag(),
            );
            if drag_response.drag_started() {
                if let Some(pointer) = drag_response.interact_pointer_pos() {
                    self.carousel.begin_drag(pointer.x);
                }
            }
            if drag_response.dragged() {
                if let Some(pointer) = drag_response.interact_pointer_pos() {
                    self.carousel.drag_to(pointer.x);
                }
            }
            if drag_response.drag_stopped() {
                self.carousel.end_drag();
            }
            if self.carousel.is_dragging() && !ui.rect_contains_pointer(viewport) {
                self.carousel.end_drag();
            }
            self.carousel.sync_from_viewport(scroll_out.state.offset.x);

            if ui
                .add(egui::Button::new(egui::RichText::new(">").size(28.0)).frame(false))
                .clicked()
            {
                self.carousel.step_next();
            }
        });
    }

    fn centered_notice(&self, ui: &mut egui::Ui, text: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(egui::RichText::new(text).size(20.0).weak());
        });
    }

    fn product_card(&mut self, ui: &mut egui::Ui, idx: usize, product: &Product) {
        ui.vertical(|ui| {
            ui.set_width(CARD_WIDTH);
            let variant = self.selection.selected(idx);
            let locator = product.images.locator(variant).to_string();
            self.card_image(ui, &locator, variant);

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(&product.name)
                    .size(15.0)
                    .strong(),
            );
            ui.label(egui::RichText::new(price_text(product.price)).size(15.0));

            ui.add_space(6.0);
            self.swatch_row(ui, idx, variant);
            ui.label(egui::RichText::new(variant.label()).size(12.0).weak());

            ui.add_space(4.0);
            self.star_row(ui, product.popularity_score);
        });
    }

    fn card_image(&mut self, ui: &mut egui::Ui, locator: &str, variant: Variant) {
        if !self.card_images.contains_key(locator) {
            self.card_images
                .insert(locator.to_string(), CardImageState::Loading);
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchCardImage {
                    url: locator.to_string(),
                },
                &mut self.status,
            );
        }

        match self.card_images.get(locator) {
            Some(CardImageState::Ready { texture, size }) => {
                ui.add(
                    egui::Image::new((texture.id(), *size))
                        .fit_to_exact_size(egui::vec2(CARD_WIDTH, CARD_WIDTH))
                        .corner_radius(18.0),
                );
            }
            _ => {
                // Swatch-tinted placeholder while the download is pending
                // (or after it failed); keeps the card footprint stable.
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(CARD_WIDTH, CARD_WIDTH),
                    egui::Sense::hover(),
                );
                let [r, g, b] = variant.swatch_rgb();
                ui.painter().rect_filled(
                    rect,
                    egui::CornerRadius::same(18),
                    egui::Color32::from_rgba_unmultiplied(r, g, b, 60),
                );
            }
        }
    }

    fn swatch_row(&mut self, ui: &mut egui::Ui, idx: usize, selected: Variant) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;
            for variant in Variant::DISPLAY_ORDER {
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(SWATCH_RADIUS * 2.5, SWATCH_RADIUS * 2.5),
                    egui::Sense::click(),
                );
                let center = rect.center();
                let [r, g, b] = variant.swatch_rgb();
                ui.painter()
                    .circle_filled(center, SWATCH_RADIUS, egui::Color32::from_rgb(r, g, b));
                let stroke = if variant == selected {
                    egui::Stroke::new(2.0, egui::Color32::BLACK)
                } else {
                    egui::Stroke::new(1.0, egui::Color32::from_gray(0xCC))
                };
                ui.painter().circle_stroke(center, SWATCH_RADIUS, stroke);
                if response.clicked() {
                    self.selection.select(idx, variant);
                }
            }
        });
    }

    fn star_row(&self, ui: &mut egui::Ui, popularity_score: f64) {
        let rating = Rating::from_score(popularity_score);
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            for _ in 0..rating.full_stars {
                ui.label(egui::RichText::new("★").color(STAR_FULL_COLOR));
            }
            if rating.half_star {
                ui.label(egui::RichText::new("☆").color(STAR_HALF_COLOR));
            }
            for _ in 0..rating.empty_stars {
                ui.label(egui::RichText::new("★").color(STAR_EMPTY_COLOR));
            }
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("{:.1}/5", display_value(popularity_score)))
                    .size(12.0),
            );
        });
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        let animating = self.carousel.tick(dt);

        egui::TopBottomPanel::top("filter-bar").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Product List").size(32.0));
            });
            ui.add_space(8.0);
            self.show_filter_bar(ui);
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("status-bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).size(11.0).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(16.0);
            self.show_carousel(ui);
        });

        if animating || self.carousel.is_dragging() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

/// Text filter for the numeric inputs: keeps digits and the first decimal
/// point, drops everything else.
fn sanitize_numeric_text(raw: &str) -> String {
    let mut seen_dot = false;
    raw.chars()
        .filter(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect()
}

fn price_text(price: f64) -> String {
    format!("${price:.2} USD")
}
