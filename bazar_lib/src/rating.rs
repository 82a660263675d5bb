//! Star ratings with partial fills.

pub const DEFAULT_MAX_STARS: u32 = 5;

/// Fill percentage (0 to 100) of each of `max` stars for `rating`.
pub fn star_fills(rating: f64, max: u32) -> Vec<f64> {
    (0..max)
        .map(|index| (rating - f64::from(index)).clamp(0.0, 1.0) * 100.0)
        .collect()
}

/// Terminal rendering: `★` for stars at least half filled, `☆` otherwise.
pub fn render_stars(rating: f64, max: u32) -> String {
    star_fills(rating, max)
        .into_iter()
        .map(|fill| if fill >= 50.0 { '★' } else { '☆' })
        .collect()
}

/// Accessible label, e.g. `Calificación: 3.5 de 5 estrellas`.
pub fn rating_label(rating: f64, max: u32) -> String {
    format!("Calificación: {} de {} estrellas", rating, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_star() {
        assert_eq!(star_fills(3.5, 5), vec![100.0, 100.0, 100.0, 50.0, 0.0]);
    }

    #[test]
    fn out_of_range_ratings_clamp() {
        assert_eq!(star_fills(-2.0, 3), vec![0.0, 0.0, 0.0]);
        assert_eq!(star_fills(9.0, 3), vec![100.0, 100.0, 100.0]);
        assert!(star_fills(4.0, 0).is_empty());
    }

    #[test]
    fn render_and_label() {
        assert_eq!(render_stars(3.5, DEFAULT_MAX_STARS), "★★★★☆");
        assert_eq!(render_stars(0.2, DEFAULT_MAX_STARS), "☆☆☆☆☆");
        assert_eq!(rating_label(3.5, 5), "Calificación: 3.5 de 5 estrellas");
        assert_eq!(rating_label(4.0, 5), "Calificación: 4 de 5 estrellas");
    }
}
