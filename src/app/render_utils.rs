use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};
use lifecycle_atlas::content::{ConsiderationKind, Priority};
use lifecycle_atlas::layout::{Point, PositionedNode};

pub(super) const ACCENT_COLOR: Color32 = Color32::from_rgb(245, 206, 93);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.3 + (factor * 0.7))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (48.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.left_top() + pan;
    let dot = Color32::from_rgba_unmultiplied(70, 80, 92, 110);

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
        while y < rect.bottom() {
            painter.circle_filled(Pos2::new(x, y), 1.0, dot);
            y += step;
        }
        x += step;
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.left_top() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.left_top() - pan) / zoom
}

pub(super) fn node_screen_rect(rect: Rect, pan: Vec2, zoom: f32, node: &PositionedNode) -> Rect {
    let min = world_to_screen(rect, pan, zoom, vec2(node.position.x, node.position.y));
    Rect::from_min_size(min, vec2(node.size.width, node.size.height) * zoom)
}

pub(super) fn to_point(world: Vec2) -> Point {
    Point {
        x: world.x,
        y: world.y,
    }
}

/// Returns the pan and zoom that center a `width` x `height` world inside
/// `rect` with `margin` screen pixels on every side.
pub(super) fn fit_transform(rect: Rect, width: f32, height: f32, margin: f32) -> (Vec2, f32) {
    let available = (rect.size() - Vec2::splat(margin * 2.0)).max(Vec2::splat(1.0));
    let zoom = if width <= 0.0 || height <= 0.0 {
        1.0
    } else {
        (available.x / width).min(available.y / height).clamp(0.1, 1.5)
    };
    let content = vec2(width, height) * zoom;
    let pan = (rect.size() - content) * 0.5;
    (pan, zoom)
}

pub(super) fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::Critical => Color32::from_rgb(235, 87, 87),
        Priority::Important => Color32::from_rgb(242, 168, 60),
        Priority::Awareness => Color32::from_rgb(96, 165, 250),
        Priority::Unknown => Color32::from_gray(120),
    }
}

pub(super) fn priority_stroke_width(priority: Priority) -> f32 {
    match priority {
        Priority::Critical => 3.0,
        Priority::Important => 2.0,
        Priority::Awareness | Priority::Unknown => 1.0,
    }
}

pub(super) fn category_color(category: &str) -> Color32 {
    match category {
        "web_tech" | "security" => Color32::from_rgb(46, 64, 92),
        "tracking" | "measurement" => Color32::from_rgb(44, 80, 56),
        "bidding" | "keyword_optimization" => Color32::from_rgb(86, 62, 40),
        "account_structure" | "campaign_types" | "audience" => Color32::from_rgb(58, 52, 92),
        "databases_sql" | "big_data" => Color32::from_rgb(72, 46, 76),
        "troubleshooting" => Color32::from_rgb(84, 52, 58),
        "strategy" | "competitive_intelligence" => Color32::from_rgb(38, 78, 86),
        _ => Color32::from_rgb(44, 50, 60),
    }
}

pub(super) fn consideration_color(kind: ConsiderationKind) -> Color32 {
    match kind {
        ConsiderationKind::Info => Color32::from_rgb(96, 165, 250),
        ConsiderationKind::Warning => Color32::from_rgb(242, 168, 60),
        ConsiderationKind::Success => Color32::from_rgb(74, 200, 120),
    }
}

pub(super) fn edge_stroke(width: f32, color: Color32, zoom: f32) -> Stroke {
    Stroke::new((width * zoom.sqrt()).clamp(0.6, 5.0), color)
}
