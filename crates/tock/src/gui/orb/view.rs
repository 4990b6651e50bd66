use super::LABEL_FONT_SIZE;
use super::model::{Orb, OrbGeometry, Point};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgb;
use std::f64::consts::PI;
use std::time::Instant;
use ticker::transition::TransitionSnapshot;

pub fn draw(
    cr: &Context,
    orb: &Orb,
    colors: &ThemeColors,
    width: f64,
    height: f64,
    now: Instant,
) -> Result<(), cairo::Error> {
    let geometry = OrbGeometry::calculate(width, height);
    let snapshot = orb.transition.snapshot(now);

    draw_face(cr, orb, &geometry, &snapshot)?;
    draw_label(cr, &orb.seconds_remaining.to_string(), &geometry, colors)
}

fn draw_face(
    cr: &Context,
    orb: &Orb,
    geometry: &OrbGeometry,
    snapshot: &TransitionSnapshot,
) -> Result<(), cairo::Error> {
    let center = geometry.center;

    cr.save()?;
    // rotate around the face center
    cr.translate(center.x, center.y);
    cr.rotate(snapshot.degrees.to_radians());
    cr.translate(-center.x, -center.y);

    fill_circle(cr, center, geometry.face_radius, orb.face)?;
    fill_circle(cr, geometry.dot_center, orb.dot_radius, snapshot.color)?;
    cr.restore()
}

fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgb<f64>,
) -> Result<(), cairo::Error> {
    let (r, g, b) = color.into_components();
    cr.set_source_rgb(r, g, b);
    cr.new_sub_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_label(
    cr: &Context,
    text: &str,
    geometry: &OrbGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.label.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(LABEL_FONT_SIZE);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        geometry.center.x - (ext.width() / 2.0 + ext.x_bearing()),
        geometry.center.y - (ext.height() / 2.0 + ext.y_bearing()),
    );
    cr.show_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Appearance;
    use palette::Srgba;
    use ticker::countdown::{CountdownState, Seconds};
    use ticker::phase::AnimationPhase;

    fn render(orb: &Orb, now: Instant) -> cairo::ImageSurface {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 200, 200).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let colors = ThemeColors {
                label: Srgba::new(0.0, 0.0, 0.0, 1.0),
            };
            draw(&cr, orb, &colors, 200.0, 200.0, now).unwrap();
        }
        surface
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> (u8, u8, u8) {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y * stride + x * 4;
        // ARgb32 is stored as native-endian u32, BGRA on little-endian
        (data[i + 2], data[i + 1], data[i])
    }

    #[test]
    fn test_face_is_filled() {
        let orb = Orb::new(&Appearance::default());
        let mut surface = render(&orb, Instant::now());
        let (r, g, b) = pixel(&mut surface, 40, 100);
        assert!(r > 200 && g > 200 && b < r, "face pixel {:?}", (r, g, b));
    }

    #[test]
    fn test_dot_color_follows_phase() {
        let mut orb = Orb::new(&Appearance::default());
        let now = Instant::now();

        let mut surface = render(&orb, now);
        let (r, _, b) = pixel(&mut surface, 100, 10);
        assert!(r > b, "start dot should be reddish");

        orb.apply(
            &CountdownState {
                phase: AnimationPhase::End,
                seconds_remaining: Seconds::new(6),
                is_running: true,
            },
            now,
        );
        // a full turn brings the dot back to the top
        let mut surface = render(&orb, now + std::time::Duration::from_secs(1));
        let (r, _, b) = pixel(&mut surface, 100, 10);
        assert!(b > r, "end dot should be bluish");
    }

    #[test]
    fn test_label_reports_context_errors() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 200, 200).unwrap();
        let cr = Context::new(&surface).unwrap();
        // unbalanced restore leaves the context in an error state
        assert!(cr.restore().is_err());

        let colors = ThemeColors {
            label: Srgba::new(0.0, 0.0, 0.0, 1.0),
        };
        let geometry = OrbGeometry::calculate(200.0, 200.0);
        assert!(draw_label(&cr, "6", &geometry, &colors).is_err());
    }
}
