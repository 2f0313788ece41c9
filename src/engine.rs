use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use carousel::constants::*;
use carousel::{Carousel, Document, ElementId, Mount, Role, Runtime, Surface};
use raylib::prelude::*;
use tracing::warn;

use crate::texture_loader::load_texture_with_exif_rotation;

const BUTTON_COLOR: Color = Color::new(255, 255, 255, 40);
const INDICATOR_COLOR: Color = Color::new(230, 230, 230, 255);

/// One carousel to show: where its images come from.
pub struct Gallery {
    pub mount: Mount,
    /// `None` when the directory could not be read; the container is then
    /// never created and the carousel stays inert.
    pub images: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Part {
    Slide,
    Prev,
    Next,
    Indicator,
}

/// Screen placement of every element of every active carousel.
#[derive(Debug, Default)]
struct Layout {
    areas: Vec<(ElementId, Part, Rectangle)>,
}

impl Layout {
    fn compute(width: f32, height: f32, carousels: &[Carousel]) -> Layout {
        let mut layout = Layout::default();
        if carousels.is_empty() {
            return layout;
        }

        let bands = carousels.len() as f32;
        let band_height = ((height - BAND_GAP * (bands + 1.0)) / bands).max(0.0);

        for (i, carousel) in carousels.iter().enumerate() {
            if !carousel.is_active() {
                continue;
            }
            let top = BAND_GAP + i as f32 * (band_height + BAND_GAP);
            let slide_height = (band_height - INDICATOR_STRIP).max(0.0);
            let slide_area = Rectangle::new(BUTTON_WIDTH, top, (width - 2.0 * BUTTON_WIDTH).max(0.0), slide_height);

            for &slide in carousel.slides() {
                layout.areas.push((slide, Part::Slide, slide_area));
            }
            if let Some(prev) = carousel.prev_control() {
                layout.areas.push((prev, Part::Prev, Rectangle::new(0.0, top, BUTTON_WIDTH, slide_height)));
            }
            if let Some(next) = carousel.next_control() {
                layout.areas.push((next, Part::Next, Rectangle::new(width - BUTTON_WIDTH, top, BUTTON_WIDTH, slide_height)));
            }

            let count = carousel.indicators().len() as f32;
            let first_x = width / 2.0 - (count - 1.0) * INDICATOR_SPACING / 2.0;
            let center_y = top + slide_height + INDICATOR_STRIP / 2.0;
            for (n, &indicator) in carousel.indicators().iter().enumerate() {
                let center_x = first_x + n as f32 * INDICATOR_SPACING;
                let half = INDICATOR_SPACING / 2.0;
                layout.areas.push((
                    indicator,
                    Part::Indicator,
                    Rectangle::new(center_x - half, center_y - half, INDICATOR_SPACING, INDICATOR_SPACING),
                ));
            }
        }
        layout
    }

    fn hit(&self, point: Vector2, surface: &Document) -> Option<ElementId> {
        self.areas
            .iter()
            .filter(|(el, _, _)| surface.is_listening(*el))
            .find(|(_, _, rect)| rect.check_collision_point_rec(point))
            .map(|(el, _, _)| *el)
    }
}

pub struct CarouselEngine {
    runtime: Runtime<Document>,
    textures: HashMap<ElementId, Texture2D>,
    layout: Layout,
}

impl CarouselEngine {
    pub fn initialize(rl: &mut RaylibHandle, thread: &RaylibThread, galleries: Vec<Gallery>) -> Self {
        let mut document = Document::new();
        let root = document.root();
        let mut textures = HashMap::new();
        let mut mounts = Vec::new();

        for gallery in galleries {
            let id = gallery.mount.container_id.clone();
            mounts.push(gallery.mount);
            let Some(paths) = gallery.images else {
                continue;
            };

            let mut loaded = Vec::new();
            for path in paths {
                match load_texture_with_exif_rotation(rl, thread, &path) {
                    Ok(texture) => loaded.push(texture),
                    Err(e) => warn!(container = %id, "skipping image: {:#}", e),
                }
            }

            let count = loaded.len();
            let container = match document.mount_carousel(root, &id, count, count, count > 1) {
                Ok(container) => container,
                Err(e) => {
                    warn!(container = %id, "could not build carousel: {}", e);
                    continue;
                }
            };
            let slides = document.query_all(container, Role::Slide);
            textures.extend(slides.into_iter().zip(loaded));
        }

        Self {
            runtime: Runtime::start(document, &mounts),
            textures,
            layout: Layout::default(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.runtime.page().active_count()
    }

    /// Feed elapsed time and input into the page.
    pub fn update(&mut self, dt: f32, rl: &RaylibHandle) {
        self.layout = Layout::compute(
            rl.get_screen_width() as f32,
            rl.get_screen_height() as f32,
            self.runtime.page().carousels(),
        );

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(element) = self.layout.hit(rl.get_mouse_position(), self.runtime.surface()) {
                self.runtime.click(element);
            }
        }

        // Arrow keys press the first active carousel's buttons
        let first = self.runtime.page().carousels().iter().find(|c| c.is_active());
        let (prev, next) = first.map_or((None, None), |c| (c.prev_control(), c.next_control()));
        if let Some(prev) = prev.filter(|_| rl.is_key_pressed(KeyboardKey::KEY_LEFT)) {
            self.runtime.click(prev);
        }
        if let Some(next) = next.filter(|_| rl.is_key_pressed(KeyboardKey::KEY_RIGHT)) {
            self.runtime.click(next);
        }

        self.runtime.advance(Duration::from_secs_f32(dt.max(0.0)));
    }

    pub fn render_frame(&self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let surface = self.runtime.surface();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);

        for (element, part, rect) in &self.layout.areas {
            let active = surface.is_active(*element);
            match part {
                Part::Slide if active => {
                    if let Some(texture) = self.textures.get(element) {
                        draw_fitted(&mut d, texture, *rect);
                    }
                }
                Part::Slide => {}
                Part::Prev | Part::Next => {
                    d.draw_rectangle_rec(*rect, BUTTON_COLOR);
                    let label = if *part == Part::Prev { "<" } else { ">" };
                    d.draw_text(
                        label,
                        (rect.x + rect.width / 2.0 - 8.0) as i32,
                        (rect.y + rect.height / 2.0 - 16.0) as i32,
                        32,
                        Color::WHITE,
                    );
                }
                Part::Indicator => {
                    let center = Vector2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                    if active {
                        d.draw_circle_v(center, INDICATOR_RADIUS, INDICATOR_COLOR);
                    } else {
                        d.draw_circle_lines(center.x as i32, center.y as i32, INDICATOR_RADIUS, INDICATOR_COLOR);
                    }
                }
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.runtime.shutdown();
    }
}

// Scale the texture down (never up) to fit inside `area`, centered
fn draw_fitted(d: &mut RaylibDrawHandle, texture: &Texture2D, area: Rectangle) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return;
    }
    let scale = (area.width / tex_width).min(area.height / tex_height).min(1.0);
    let width = tex_width * scale;
    let height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            area.x + (area.width - width) / 2.0,
            area.y + (area.height - height) / 2.0,
            width,
            height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}
