//! Gauss-Legendre quadrature for consistent element load vectors.
//!
//! The 4-point rule integrates polynomials up to degree 7 exactly, which
//! covers a cubic shape function times a linearly varying intensity with room
//! to spare.

/// A quadrature point on the reference interval [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussPoint {
    /// Natural coordinate ξ ∈ [-1, 1]
    pub xi: f64,
    /// Integration weight
    pub weight: f64,
}

impl GaussPoint {
    /// Map ξ ∈ [-1, 1] onto the element-normalized coordinate s ∈ [0, 1]
    #[inline]
    pub fn normalized(&self) -> f64 {
        (self.xi + 1.0) / 2.0
    }
}

/// 4-point Gauss-Legendre rule.
///
/// Points: ±√((3 ∓ 2√(6/5))/7), weights: (18 ± √30)/36.
pub fn gauss_legendre_4() -> [GaussPoint; 4] {
    let sqrt_6_5 = (6.0 / 5.0_f64).sqrt();
    let inner = ((3.0 - 2.0 * sqrt_6_5) / 7.0).sqrt();
    let outer = ((3.0 + 2.0 * sqrt_6_5) / 7.0).sqrt();
    let sqrt_30 = 30.0_f64.sqrt();
    let w_inner = (18.0 + sqrt_30) / 36.0;
    let w_outer = (18.0 - sqrt_30) / 36.0;
    [
        GaussPoint { xi: -outer, weight: w_outer },
        GaussPoint { xi: -inner, weight: w_inner },
        GaussPoint { xi: inner, weight: w_inner },
        GaussPoint { xi: outer, weight: w_outer },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weights_sum_to_interval_length() {
        let total: f64 = gauss_legendre_4().iter().map(|gp| gp.weight).sum();
        assert_abs_diff_eq!(total, 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_integrates_degree_seven_exactly() {
        // ∫_{-1}^{1} x^6 dx = 2/7, odd powers vanish
        let rule = gauss_legendre_4();
        let even: f64 = rule.iter().map(|gp| gp.weight * gp.xi.powi(6)).sum();
        let odd: f64 = rule.iter().map(|gp| gp.weight * gp.xi.powi(7)).sum();
        assert_abs_diff_eq!(even, 2.0 / 7.0, epsilon = 1e-14);
        assert_abs_diff_eq!(odd, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_normalized_coordinates_are_interior() {
        for gp in gauss_legendre_4() {
            let s = gp.normalized();
            assert!(s > 0.0 && s < 1.0);
        }
    }
}
