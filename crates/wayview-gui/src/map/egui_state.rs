use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use galileo::Messenger;
use galileo::control::{MouseButton, RawUserEvent};
use galileo::render::WgpuRenderer;
use galileo_types::cartesian::{Point2, Size};

use crate::map::MapSurface;

/// Renders the galileo map into a wgpu texture and paints that texture
/// into the egui central panel, feeding pointer input back into the map.
pub struct EguiMapState {
    surface: MapSurface,
    renderer: WgpuRenderer,
    egui_render_state: egui_wgpu::RenderState,
    texture_id: egui::TextureId,
    texture_view: wgpu::TextureView,
    requires_redraw: Arc<AtomicBool>,
}

impl EguiMapState {
    pub fn new(
        ctx: egui::Context,
        render_state: egui_wgpu::RenderState,
        mut surface: MapSurface,
    ) -> Self {
        let requires_redraw = Arc::new(AtomicBool::new(true));
        let messenger = MapStateMessenger {
            context: ctx.clone(),
            requires_redraw: requires_redraw.clone(),
        };

        let size = Size::new(1, 1);

        {
            let map = surface.map_mut();
            map.set_messenger(Some(messenger.clone()));

            let layers = map.layers_mut();
            layers.iter_mut().for_each(|layer| {
                layer.set_messenger(Box::new(messenger.clone()));
            });
        }
        surface.set_size(size.cast());

        let renderer = WgpuRenderer::new_with_device_and_texture(
            render_state.device.clone(),
            render_state.queue.clone(),
            size,
        );

        let texture = renderer
            .get_target_texture_view()
            .expect("failed to get map texture");
        let texture_id = render_state.renderer.write().register_native_texture(
            &render_state.device,
            &texture,
            wgpu::FilterMode::Nearest,
        );

        Self {
            surface,
            renderer,
            egui_render_state: render_state,
            texture_id,
            texture_view: texture,
            requires_redraw,
        }
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut MapSurface {
        &mut self.surface
    }

    pub fn render(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let available_size = ui.max_rect().size();
        let map_size = self.renderer.size().cast::<f32>();

        let (rect, response) =
            ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

        if response.contains_pointer() {
            let events = ui.input(|input| input.events.clone());
            self.process_events(&events, [-rect.left(), -rect.top()]);
        }

        self.surface.map_mut().animate();

        if available_size[0] != map_size.width() || available_size[1] != map_size.height() {
            self.resize_map(available_size);
        }

        if self.requires_redraw.swap(false, Ordering::Relaxed) {
            self.draw();
        }

        egui::Image::new(egui::ImageSource::Texture(egui::load::SizedTexture::new(
            self.texture_id,
            egui::Vec2::new(map_size.width(), map_size.height()),
        )))
        .paint_at(ui, rect);

        response
    }

    fn resize_map(&mut self, size: egui::Vec2) {
        log::trace!("Resizing map to size: {size:?}");

        let size = Size::new(size.x as f64, size.y as f64);
        self.surface.set_size(size);

        let size = Size::new(size.width() as u32, size.height() as u32);
        self.renderer.resize(size);

        // Resizing the renderer replaces its target texture, so the
        // texture registered with egui has to be replaced as well.
        let texture = self
            .renderer
            .get_target_texture_view()
            .expect("failed to get map texture");
        let texture_id = self
            .egui_render_state
            .renderer
            .write()
            .register_native_texture(
                &self.egui_render_state.device,
                &texture,
                wgpu::FilterMode::Nearest,
            );

        self.texture_id = texture_id;
        self.texture_view = texture;

        self.surface.redraw();
    }

    fn draw(&mut self) {
        self.surface.map().load_layers();
        self.renderer
            .render_to_texture_view(self.surface.map(), &self.texture_view);
    }

    fn process_events(&mut self, events: &[egui::Event], offset: [f32; 2]) {
        for event in events {
            if let Some(raw_event) = Self::convert_event(event, offset) {
                self.surface.handle_event(raw_event);
            }
        }
    }

    fn convert_event(event: &egui::Event, offset: [f32; 2]) -> Option<RawUserEvent> {
        match event {
            egui::Event::PointerButton {
                button, pressed, ..
            } => {
                let button = match button {
                    egui::PointerButton::Primary => MouseButton::Left,
                    egui::PointerButton::Secondary => MouseButton::Right,
                    egui::PointerButton::Middle => MouseButton::Middle,
                    _ => MouseButton::Other,
                };

                Some(match pressed {
                    true => RawUserEvent::ButtonPressed(button),
                    false => RawUserEvent::ButtonReleased(button),
                })
            }
            egui::Event::PointerMoved(position) => {
                let pointer_position = Point2::new(
                    (position.x + offset[0]) as f64,
                    (position.y + offset[1]) as f64,
                );
                Some(RawUserEvent::PointerMoved(pointer_position))
            }
            egui::Event::MouseWheel { delta, .. } => {
                let zoom = delta[1] as f64;

                if zoom.abs() < 0.0001 {
                    return None;
                }

                Some(RawUserEvent::Scroll(zoom))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapStateMessenger {
    pub requires_redraw: Arc<AtomicBool>,
    pub context: egui::Context,
}

impl Messenger for MapStateMessenger {
    fn request_redraw(&self) {
        if !self.requires_redraw.swap(true, Ordering::Relaxed) {
            self.context.request_repaint();
        }
    }
}
