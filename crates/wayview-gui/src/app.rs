use std::sync::Arc;

use eframe::CreationContext;
use egui::Frame;
use tokio::sync::mpsc;
use wayview::client::{ApiClient, GraphSource};
use wayview::route::RouteQuery;
use wayview::selection::Endpoint;
use wayview::types::{Coordinate, DisplayMode, path_bounds};

use crate::event_handler::{Event, EventHandler};
use crate::map::MapSurface;
use crate::map::egui_state::EguiMapState;
use crate::types::Dirty;
use crate::widgets::ErrorModal;

pub mod app_data;

use app_data::AppData;

/// How many completion events can queue up before a fetch task would
/// block; two fetch kinds exist, so this is generous.
const EVENT_CHANNEL_SIZE: usize = 16;

pub struct Options {
    pub server: String,
    pub city: String,
    pub view_center: Coordinate,
}

pub struct WayviewApp {
    map: EguiMapState,
    runtime: tokio::runtime::Runtime,
    client: Arc<ApiClient>,
    sender: mpsc::Sender<Event>,
    events: EventHandler,
    error_modal: ErrorModal,
    data: AppData,
}

impl WayviewApp {
    pub fn new(options: Options, cc: &CreationContext<'_>) -> Self {
        let map = EguiMapState::new(
            cc.egui_ctx.clone(),
            cc.wgpu_render_state
                .clone()
                .expect("failed to get wgpu context"),
            MapSurface::new(options.view_center),
        );

        let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_SIZE);

        Self {
            map,
            runtime,
            client: Arc::new(ApiClient::new(&options.server)),
            sender,
            events: EventHandler::new(receiver),
            error_modal: ErrorModal::new(&cc.egui_ctx, "wayview_error_modal"),
            data: AppData::new(options.city),
        }
    }

    /// Applies pending state changes to the map layers. Runs after the
    /// events of this frame have been handled, so everything the user
    /// sees this frame is already consistent.
    fn reconcile(&mut self) {
        if self.data.mode_changed {
            self.map.surface_mut().set_mode(self.data.mode);
            self.data.mode_changed = false;
        }

        if let Some(city) = &mut self.data.wireframe_for
            && city.is_dirty()
        {
            if let Some(snapshot) = self.data.cache.get(city) {
                self.map.surface_mut().set_wireframe(snapshot);
            }
            city.set_clean();
        }

        if let Some(route) = &mut self.data.route
            && route.is_dirty()
        {
            self.map.surface_mut().set_route(&route.path);
            if let Some((min, max)) = path_bounds(&route.path) {
                self.map.surface_mut().fit_to_bounds(min, max);
            }
            route.set_clean();
        }
    }

    /// A map click assigns the next endpoint: marker, input field and
    /// selection state all change together, once per click.
    fn handle_clicks(&mut self) {
        let Some(position) = self.map.surface_mut().take_click() else {
            return;
        };

        let endpoint = self.data.selection.select(position);
        let text = position.to_field_text();
        match endpoint {
            Endpoint::Start => self.data.start_input = text,
            Endpoint::End => self.data.end_input = text,
        }
        self.map.surface_mut().place_marker(endpoint, position);
    }

    fn apply_mode(&mut self, graph_enabled: bool) {
        let mode = if graph_enabled {
            DisplayMode::Graph
        } else {
            DisplayMode::Tile
        };
        self.data.mode = mode;
        self.map.surface_mut().set_mode(mode);

        if mode != DisplayMode::Graph {
            return;
        }

        let city = self.data.city_input.trim().to_string();
        if self.data.cache.is_loaded(&city) {
            // Warm cache: no network request, just make sure the drawn
            // wireframe belongs to this city.
            if self.data.wireframe_for.as_deref() != Some(&city) {
                self.data.wireframe_for = Some(Dirty::new(city));
            }
        } else if !self.data.graph_inflight {
            self.spawn_graph_fetch(city);
        }
    }

    fn spawn_graph_fetch(&mut self, city: String) {
        self.data.graph_inflight = true;
        self.data.busy = Some("Downloading full graph geometry...".to_string());

        let client = self.client.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let event = match client.fetch_graph(&city).await {
                Ok(snapshot) => Event::GraphLoaded(snapshot),
                Err(err) => Event::GraphFailed(err),
            };
            if sender.send(event).await.is_err() {
                log::warn!("Event channel closed before graph fetch completed");
            }
        });
    }

    fn find_route(&mut self) {
        let query = match RouteQuery::parse(
            &self.data.city_input,
            &self.data.start_input,
            &self.data.end_input,
        ) {
            Ok(query) => query,
            Err(err) => {
                self.data.alert = Some(err.to_string());
                return;
            }
        };

        // The previous route comes off the map before the request goes
        // out, so a failed request leaves an empty route layer, never a
        // stale one.
        self.data.route = None;
        self.map.surface_mut().clear_route();

        let id = self.data.routes.issue();
        self.data.busy = Some("Calculating path...".to_string());

        let client = self.client.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let outcome = query.fetch(client.as_ref()).await;
            if sender
                .send(Event::RouteResolved { id, outcome })
                .await
                .is_err()
            {
                log::warn!("Event channel closed before route request completed");
            }
        });
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("controls").show(ctx, |ui| {
            ui.heading("Wayview");

            ui.label("City:");
            ui.text_edit_singleline(&mut self.data.city_input);

            let mut graph_enabled = self.data.mode == DisplayMode::Graph;
            if ui
                .checkbox(&mut graph_enabled, "Show graph wireframe")
                .changed()
            {
                self.apply_mode(graph_enabled);
            }

            ui.separator();

            ui.label("Start:");
            ui.text_edit_singleline(&mut self.data.start_input);
            ui.label("End:");
            ui.text_edit_singleline(&mut self.data.end_input);
            ui.small("Click the map to set start and end in turn.");

            if ui.button("Find route").clicked() {
                self.find_route();
            }

            if let Some(message) = &self.data.busy {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(message);
                });
            }

            if let Some(route) = self.data.route.as_deref() {
                ui.separator();
                ui.label(format!("Distance: {:.2} m", route.distance_meters));
                ui.label(format!("Nodes: {}", route.node_count));
            }
        });
    }
}

impl eframe::App for WayviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let _rt_ctx = self.runtime.enter();

        self.events.handle_events(&mut self.data);
        self.reconcile();
        self.handle_clicks();

        self.side_panel(ctx);

        if let Some(body) = self.data.alert.take() {
            self.error_modal.alert(&body);
        }
        self.error_modal.show();

        egui::CentralPanel::default()
            .frame(Frame::new().inner_margin(0).outer_margin(0))
            .show(ctx, |ui| {
                self.map.render(ui);
            });
    }
}
