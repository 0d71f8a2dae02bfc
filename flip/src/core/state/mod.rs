/// State of the water column in phase space (q, v).
///
/// Structure-of-Arrays layout: one `Vec<f64>` of axial slice positions and one
/// of axial slice velocities, indexed by slice. The index only identifies a
/// slice; it carries no adjacency meaning once the column starts moving.
///
/// Positions are measured along the bottle axis from the base (0) to the cap
/// (bottle height).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterColumn {
    /// Axial slice positions (q).
    pub q: Vec<f64>,

    /// Axial slice velocities (v = \dot{q}).
    pub v: Vec<f64>,

    /// Mass carried by every slice. All slices share the water equally.
    pub slice_mass: f64,
}

impl WaterColumn {
    /// Lays out `slices` slices evenly from the base up to `fill_height`, at rest.
    ///
    /// The first slice sits on the base and the last one at `fill_height`; a
    /// single slice sits on the base.
    pub fn at_rest(slices: usize, fill_height: f64, water_mass: f64) -> Self {
        let q = match slices {
            0 => Vec::new(),
            1 => vec![0.0],
            n => {
                let spacing = fill_height / (n - 1) as f64;
                (0..n).map(|i| i as f64 * spacing).collect()
            }
        };

        let slice_mass = if slices == 0 {
            0.0
        } else {
            water_mass / slices as f64
        };

        Self {
            v: vec![0.0; q.len()],
            q,
            slice_mass,
        }
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Total water mass carried by the column.
    pub fn water_mass(&self) -> f64 {
        self.slice_mass * self.len() as f64
    }

    /// Arithmetic mean of the slice positions, 0 for an empty column.
    pub fn mean_position(&self) -> f64 {
        if self.q.is_empty() {
            return 0.0;
        }
        self.q.iter().sum::<f64>() / self.q.len() as f64
    }
}

/// Rigid-body state of the bottle.
///
/// `omega` is not integrated: it is re-solved from the conserved angular
/// momentum every step and only cached here for the step in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BottleState {
    /// Tilt angle (radians).
    pub angle: f64,
    /// Angular velocity (rad/s) solved for the current step.
    pub omega: f64,
    /// Current time of the state snapshot.
    pub t: f64,
}
