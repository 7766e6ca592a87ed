//! The canonical siting dataset.

use std::collections::HashMap;

use crate::error::DatasetError;

/// Identifier of a demand origin (e.g. a census block geoid).
pub type OriginId = u64;

/// Identifier of a destination (an existing or candidate facility site).
pub type DestId = u64;

/// A facility siting instance: origins with population weights, destinations
/// partitioned into forced-open and candidate sites, and a sparse
/// origin-to-destination distance table.
///
/// A pair absent from the distance table is unreachable; assignment
/// variables are only created for pairs that are present. The dataset is
/// read-only once constructed and can be shared across several formulation
/// builds without synchronization.
///
/// # Examples
///
/// ```
/// use equiloc::models::Dataset;
///
/// let grid = Dataset::grid(3);
/// assert_eq!(grid.num_origins(), 9);
/// assert_eq!(grid.num_destinations(), 9);
/// assert!(grid.validate().is_ok());
/// // distance between opposite corners of a 3x3 grid
/// let d = grid.distance(0, 8).unwrap();
/// assert!((d - 8.0f64.sqrt()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    origins: Vec<OriginId>,
    destinations: Vec<DestId>,
    populations: HashMap<OriginId, f64>,
    distances: HashMap<(OriginId, DestId), f64>,
    existing: Vec<DestId>,
}

impl Dataset {
    /// Creates a dataset from its parts. Call [`validate`](Self::validate)
    /// before handing it to a calibrator or formulation.
    pub fn new(
        origins: Vec<OriginId>,
        destinations: Vec<DestId>,
        populations: HashMap<OriginId, f64>,
        distances: HashMap<(OriginId, DestId), f64>,
        existing: Vec<DestId>,
    ) -> Self {
        Self {
            origins,
            destinations,
            populations,
            distances,
            existing,
        }
    }

    /// Generates a synthetic `size` x `size` grid instance: every cell is
    /// both an origin and a candidate destination, population weight is 1,
    /// distances are Euclidean between cell centers, and nothing is open.
    ///
    /// Cell `i` sits at column `i % size`, row `i / size`.
    pub fn grid(size: usize) -> Self {
        let n = size * size;
        let ids: Vec<u64> = (0..n as u64).collect();

        let populations = ids.iter().map(|&o| (o, 1.0)).collect();

        let mut distances = HashMap::with_capacity(n * n);
        for &o in &ids {
            for &d in &ids {
                let vert = (o as i64 / size as i64 - d as i64 / size as i64).abs() as f64;
                let horiz = (o as i64 % size as i64 - d as i64 % size as i64).abs() as f64;
                distances.insert((o, d), (horiz * horiz + vert * vert).sqrt());
            }
        }

        Self {
            origins: ids.clone(),
            destinations: ids,
            populations,
            distances,
            existing: Vec::new(),
        }
    }

    /// Checks the structural invariants: non-empty origin and destination
    /// sets, a non-negative weight for every origin, at least one reachable
    /// destination per origin, non-negative distances, forced-open ids drawn
    /// from the destination set, and at least one positive weight overall.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.origins.is_empty() {
            return Err(DatasetError::NoOrigins);
        }
        if self.destinations.is_empty() {
            return Err(DatasetError::NoDestinations);
        }
        for &d in &self.existing {
            if !self.destinations.contains(&d) {
                return Err(DatasetError::UnknownExisting(d));
            }
        }
        let mut total_weight = 0.0;
        for &o in &self.origins {
            let weight = match self.populations.get(&o) {
                Some(&w) => w,
                None => return Err(DatasetError::MissingPopulation(o)),
            };
            if weight < 0.0 {
                return Err(DatasetError::NegativeWeight { origin: o, weight });
            }
            total_weight += weight;
            let mut reachable = false;
            for &d in &self.destinations {
                if let Some(&dist) = self.distances.get(&(o, d)) {
                    if dist < 0.0 {
                        return Err(DatasetError::NegativeDistance {
                            origin: o,
                            destination: d,
                            distance: dist,
                        });
                    }
                    reachable = true;
                }
            }
            if !reachable {
                return Err(DatasetError::UnreachableOrigin(o));
            }
        }
        if total_weight == 0.0 {
            return Err(DatasetError::ZeroPopulation);
        }
        Ok(())
    }

    /// Origins, in insertion order.
    pub fn origins(&self) -> &[OriginId] {
        &self.origins
    }

    /// Destinations (forced-open and candidate), in insertion order.
    pub fn destinations(&self) -> &[DestId] {
        &self.destinations
    }

    /// Destinations forced open in every solution.
    pub fn existing(&self) -> &[DestId] {
        &self.existing
    }

    /// Destinations that may be opened (not already forced open).
    pub fn candidates(&self) -> Vec<DestId> {
        self.destinations
            .iter()
            .copied()
            .filter(|d| !self.existing.contains(d))
            .collect()
    }

    /// Number of origins.
    pub fn num_origins(&self) -> usize {
        self.origins.len()
    }

    /// Number of destinations.
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Population weight of an origin (zero if unknown).
    pub fn population(&self, origin: OriginId) -> f64 {
        self.populations.get(&origin).copied().unwrap_or(0.0)
    }

    /// Travel distance for a pair, or `None` if the pair is unreachable.
    pub fn distance(&self, origin: OriginId, destination: DestId) -> Option<f64> {
        self.distances.get(&(origin, destination)).copied()
    }

    /// Reachable destinations of an origin with their distances, in
    /// destination insertion order.
    pub fn reachable(&self, origin: OriginId) -> Vec<(DestId, f64)> {
        self.destinations
            .iter()
            .filter_map(|&d| self.distance(origin, d).map(|dist| (d, dist)))
            .collect()
    }

    /// Largest reachable distance of an origin, or `None` if unreachable.
    pub fn max_distance(&self, origin: OriginId) -> Option<f64> {
        self.reachable(origin)
            .into_iter()
            .map(|(_, dist)| dist)
            .fold(None, |acc, d| Some(acc.map_or(d, |a: f64| a.max(d))))
    }

    /// Distance from an origin to its nearest destination among `subset`,
    /// or `None` if no member of `subset` is reachable.
    pub fn nearest_distance(&self, origin: OriginId, subset: &[DestId]) -> Option<f64> {
        subset
            .iter()
            .filter_map(|&d| self.distance(origin, d))
            .fold(None, |acc, d| Some(acc.map_or(d, |a: f64| a.min(d))))
    }
}
