//! Attribute provider interface and synthetic providers
//!
//! The grid pulls per-cell environmental attributes through
//! [`AttributeProvider`]. Real providers wrap remote geospatial/weather
//! sources and are outside this crate; the two providers here generate
//! synthetic terrain for tests, demos and benchmarks.

use crate::core_types::EnvironmentSample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Provider-side failure, surfaced by the grid as a fatal generation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The backing data source has no usable record for the location
    DataUnavailable(String),
}

impl std::fmt::Display for AttributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeError::DataUnavailable(msg) => write!(f, "Data unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AttributeError {}

/// Source of per-cell environmental attributes, keyed by geographic location.
///
/// Grids without a geographic reference query with the synthetic convention
/// `latitude = -y`, `longitude = x` (one degree per cell), so providers that
/// only care about grid structure can invert it.
pub trait AttributeProvider {
    /// Fetch the environmental attributes at a location.
    ///
    /// # Errors
    /// [`AttributeError::DataUnavailable`] when the source has no record;
    /// the grid treats this as fatal for the whole generation.
    fn get_environment(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<EnvironmentSample, AttributeError>;
}

/// Provider returning one sample for every location.
///
/// The synthetic counterpart of a uniform-weather scenario: every cell shares
/// the same wind, fuel and ambient conditions.
#[derive(Debug, Clone)]
pub struct UniformProvider {
    sample: EnvironmentSample,
}

impl UniformProvider {
    /// Uniform combustible terrain with default ambient conditions
    pub fn new() -> Self {
        UniformProvider {
            sample: EnvironmentSample::default(),
        }
    }

    /// Set the wind speed (m/s)
    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.sample.wind_speed = wind_speed;
        self
    }

    /// Set the wind direction (degrees from north)
    pub fn wind_direction(mut self, wind_direction: f64) -> Self {
        self.sample.wind_direction = wind_direction;
        self
    }

    /// Set the fuel load (0-100 %)
    pub fn fuel_load(mut self, fuel_load: f64) -> Self {
        self.sample.fuel_load = fuel_load;
        self
    }

    /// Set the ambient temperature (°C)
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.sample.temperature = temperature;
        self
    }

    /// Set the relative humidity (0-100 %)
    pub fn humidity(mut self, humidity: f64) -> Self {
        self.sample.humidity = humidity;
        self
    }

    /// Set a uniform terrain elevation (m)
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.sample.elevation = Some(elevation);
        self
    }
}

impl Default for UniformProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeProvider for UniformProvider {
    fn get_environment(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<EnvironmentSample, AttributeError> {
        Ok(self.sample)
    }
}

/// Provider generating a coarse patchwork of random fuel regions.
///
/// The grid is divided into square regions of `region_size` cells, each
/// assigned a fuel load drawn from 1-100 % with a seeded RNG, so repeated
/// generation of the same scenario is deterministic. Expects the synthetic
/// coordinate convention (see [`AttributeProvider`]).
#[derive(Debug, Clone)]
pub struct PatchworkFuelProvider {
    width: u32,
    height: u32,
    region_size: u32,
    regions_x: u32,
    region_fuel: Vec<f64>,
    base: EnvironmentSample,
    non_combustible_below: Option<f64>,
}

impl PatchworkFuelProvider {
    /// Build a patchwork for a `width` x `height` grid.
    ///
    /// `region_size` is clamped to at least 1 cell.
    pub fn new(width: u32, height: u32, region_size: u32, seed: u64) -> Self {
        let region_size = region_size.max(1);
        let regions_x = width.div_ceil(region_size);
        let regions_y = height.div_ceil(region_size);

        let mut rng = StdRng::seed_from_u64(seed);
        let region_fuel = (0..regions_x * regions_y)
            .map(|_| f64::from(rng.random_range(1..=100)))
            .collect();

        PatchworkFuelProvider {
            width,
            height,
            region_size,
            regions_x,
            region_fuel,
            base: EnvironmentSample::default(),
            non_combustible_below: None,
        }
    }

    /// Replace the ambient conditions shared by every cell (fuel load is
    /// still taken from the patchwork)
    pub fn base_sample(mut self, base: EnvironmentSample) -> Self {
        self.base = base;
        self
    }

    /// Mark cells in regions below this fuel load (%) as non-combustible
    pub fn non_combustible_below(mut self, threshold: f64) -> Self {
        self.non_combustible_below = Some(threshold);
        self
    }

    fn fuel_at(&self, x: u32, y: u32) -> f64 {
        let region_x = x / self.region_size;
        let region_y = y / self.region_size;
        self.region_fuel[(region_y * self.regions_x + region_x) as usize]
    }
}

impl AttributeProvider for PatchworkFuelProvider {
    fn get_environment(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<EnvironmentSample, AttributeError> {
        let x = longitude.round();
        let y = -latitude.round();
        if x < 0.0 || y < 0.0 || x >= f64::from(self.width) || y >= f64::from(self.height) {
            return Err(AttributeError::DataUnavailable(format!(
                "({latitude}, {longitude}) maps outside the {}x{} patchwork",
                self.width, self.height
            )));
        }

        let fuel_load = self.fuel_at(x as u32, y as u32);
        let combustible = self
            .non_combustible_below
            .is_none_or(|threshold| fuel_load >= threshold);

        Ok(EnvironmentSample {
            fuel_load,
            combustible,
            ..self.base
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_provider_is_location_independent() {
        let provider = UniformProvider::new().wind_speed(12.0).fuel_load(80.0);
        let a = provider.get_environment(0.0, 0.0).unwrap();
        let b = provider.get_environment(-45.0, 120.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.wind_speed, 12.0);
        assert_eq!(a.fuel_load, 80.0);
    }

    #[test]
    fn patchwork_is_deterministic_per_seed() {
        let a = PatchworkFuelProvider::new(40, 40, 10, 7);
        let b = PatchworkFuelProvider::new(40, 40, 10, 7);
        for y in 0..40 {
            for x in 0..40 {
                let (lat, lon) = (-f64::from(y), f64::from(x));
                assert_eq!(
                    a.get_environment(lat, lon).unwrap().fuel_load,
                    b.get_environment(lat, lon).unwrap().fuel_load
                );
            }
        }
    }

    #[test]
    fn patchwork_is_constant_within_a_region() {
        let provider = PatchworkFuelProvider::new(20, 20, 10, 1);
        let corner = provider.get_environment(0.0, 0.0).unwrap().fuel_load;
        assert_eq!(provider.get_environment(-9.0, 9.0).unwrap().fuel_load, corner);
    }

    #[test]
    fn patchwork_rejects_out_of_range_queries() {
        let provider = PatchworkFuelProvider::new(10, 10, 5, 1);
        assert!(provider.get_environment(-20.0, 0.0).is_err());
        assert!(provider.get_environment(5.0, 0.0).is_err());
    }

    #[test]
    fn low_fuel_regions_can_be_marked_non_combustible() {
        let provider = PatchworkFuelProvider::new(50, 50, 5, 3).non_combustible_below(40.0);
        for y in 0..50u32 {
            for x in 0..50u32 {
                let sample = provider
                    .get_environment(-f64::from(y), f64::from(x))
                    .unwrap();
                assert_eq!(sample.combustible, sample.fuel_load >= 40.0);
            }
        }
    }
}
