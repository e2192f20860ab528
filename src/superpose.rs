//! Least-squares rigid-body superposition (Kabsch).

use crate::error::{PlotError, Result};
use nalgebra::{Matrix3, Vector3};

/// Rigid-body transform mapping a mobile point set onto a reference
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub rotation: Matrix3<f64>,
    pub mobile_centroid: Vector3<f64>,
    pub reference_centroid: Vector3<f64>,
}

impl Superposition {
    /// Rotate about the mobile centroid and move onto the reference centroid
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        let p = Vector3::from(point) - self.mobile_centroid;
        let r = self.rotation * p + self.reference_centroid;
        [r.x, r.y, r.z]
    }

    pub fn apply_all(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        points.iter().map(|p| self.apply(*p)).collect()
    }
}

pub fn centroid(points: &[[f64; 3]]) -> Vector3<f64> {
    if points.is_empty() {
        return Vector3::zeros();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + Vector3::from(*p));
    sum / points.len() as f64
}

/// Optimal rotation and translation taking `mobile` onto `reference`.
///
/// Builds the covariance `H = Σ x yᵀ` of the centred sets, decomposes it as
/// `U S Vᵀ` and returns `R = V D Uᵀ`, where `D` flips the last axis when the
/// plain solution would be a reflection.
pub fn kabsch(mobile: &[[f64; 3]], reference: &[[f64; 3]]) -> Result<Superposition> {
    if mobile.len() != reference.len() {
        return Err(PlotError::AtomCountMismatch {
            expected: reference.len(),
            actual: mobile.len(),
        });
    }
    if mobile.is_empty() {
        return Err(PlotError::NoAtoms);
    }

    let cx = centroid(mobile);
    let cy = centroid(reference);
    let mut h = Matrix3::zeros();
    for (x, y) in mobile.iter().zip(reference) {
        let xr = Vector3::from(*x) - cx;
        let yr = Vector3::from(*y) - cy;
        h += xr * yr.transpose();
    }

    let svd = h.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => {
            return Err(PlotError::Superposition(
                "SVD did not produce singular vectors".into(),
            ))
        }
    };
    let v = v_t.transpose();
    let u_t = u.transpose();
    let d = if (v * u_t).determinant() < 0.0 { -1.0 } else { 1.0 };
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    let rotation = v * correction * u_t;

    Ok(Superposition {
        rotation,
        mobile_centroid: cx,
        reference_centroid: cy,
    })
}

/// Aligned copy of `mobile` in the reference frame
pub fn superpose_frame(mobile: &[[f64; 3]], reference: &[[f64; 3]]) -> Result<Vec<[f64; 3]>> {
    Ok(kabsch(mobile, reference)?.apply_all(mobile))
}
