//! Best-hit selection over a sphere set.

use log::debug;
use pocketray_math::round_to;
use rayon::prelude::*;

use crate::error::Result;
use crate::intersect::intersect_sphere;
use crate::ray::{RayHit, SampleRay};
use crate::settings::CastSettings;
use crate::sphere::{within_reach, Sphere};

/// Casts sampling rays from the origin against an immutable sphere set.
#[derive(Debug, Clone)]
pub struct CavityCaster {
    spheres: Vec<Sphere>,
    max_radius: f64,
    decimals: u32,
}

impl CavityCaster {
    /// Build a caster, dropping spheres outside the pre-filter distance.
    ///
    /// Sphere order is preserved; it decides ties between equal hits.
    pub fn new(spheres: Vec<Sphere>, settings: &CastSettings) -> Result<Self> {
        settings.validate()?;
        for sphere in &spheres {
            sphere.validate()?;
        }

        let total = spheres.len();
        let reach = settings.reach();
        let spheres: Vec<Sphere> = spheres
            .into_iter()
            .filter(|s| within_reach(&s.center, reach))
            .collect();
        debug!(
            "cavity caster: {} of {} spheres within {:.2} Å",
            spheres.len(),
            total,
            reach
        );

        Ok(Self {
            spheres,
            max_radius: settings.max_radius,
            decimals: settings.distance_decimals,
        })
    }

    /// Spheres that survived the pre-filter, in input order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Ray length ceiling.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Cast one ray.
    ///
    /// The sphere with the smallest near-surface distance wins; the first
    /// in input order wins ties. A winner at or beyond `max_radius` is
    /// truncated and carries no sphere. Distances below zero (origin inside
    /// a sphere) report zero.
    pub fn cast(&self, ray: &SampleRay) -> RayHit<'_> {
        let mut best: Option<(f64, &Sphere)> = None;
        for sphere in &self.spheres {
            let Some(hit) = intersect_sphere(ray, sphere) else {
                continue;
            };
            if best.map_or(true, |(t, _)| hit.t < t) {
                best = Some((hit.t, sphere));
            }
        }

        match best {
            Some((t, sphere)) if t < self.max_radius => {
                let t = t.max(0.0);
                RayHit {
                    distance: round_to(t, self.decimals).min(self.max_radius),
                    point: ray.at(t),
                    sphere: Some(sphere),
                }
            }
            _ => RayHit::truncated(ray, self.max_radius),
        }
    }

    /// Cast every ray, in parallel. Output order follows `rays`.
    pub fn cast_all(&self, rays: &[SampleRay]) -> Vec<RayHit<'_>> {
        rays.par_iter().map(|ray| self.cast(ray)).collect()
    }
}
