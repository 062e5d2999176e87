//! Configuration surface for the outer driver (spec §6).
//!
//! Builder-style, following the teacher's `TruncatedEig` pattern: start from
//! `DavidsonConfig::new(num_evals)` with sane defaults and chain setters.
//! There is no file, environment, or CLI parsing here — that is explicitly
//! out of scope.

/// Which extreme (or interior) eigenvalues to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Smallest,
    Largest,
    ClosestAbs,
    ClosestLeq,
    ClosestGeq,
    Interior,
}

/// Extraction strategy used to turn the projected problem into Ritz pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Plain Rayleigh-Ritz: eigendecomposition of `H = V* A V`.
    RayleighRitz,
    /// Harmonic Ritz: QR of `(A - tau*I) V`, extraction from `Q* A Q`.
    Harmonic,
    /// Refined Ritz: harmonic plus an SVD of `R` to pick the best direction
    /// in the column span of `Q`.
    Refined,
}

/// Whether converged pairs are removed from the working basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locking {
    Off,
    On,
}

/// Initial setting for the dynamic method switch (spec §4.7). `Off` pins the
/// solver to a single correction strategy for its whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicSwitchConfig {
    Off,
    Dyn1,
    Dyn2,
    Dyn3,
    Dyn4,
}

/// Projector combination applied to the correction-equation right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrectionProjectors {
    pub right_q: bool,
    pub skew_q: bool,
    pub right_x: bool,
    pub skew_x: bool,
}

/// Inner correction-equation configuration.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionConfig {
    /// `0` = plain GD+k preconditioned step, no inner iteration.
    /// negative = adaptive JDQMR (inner iteration count chosen by the cost
    /// model), positive = fixed inner iteration count.
    pub max_inner_iterations: i32,
    pub precondition: bool,
    pub projectors: CorrectionProjectors,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        CorrectionConfig {
            max_inner_iterations: 0,
            precondition: false,
            projectors: CorrectionProjectors::default(),
        }
    }
}

/// Full configuration surface for [`crate::driver::solve`].
#[derive(Debug, Clone)]
pub struct DavidsonConfig<R> {
    pub num_evals: usize,
    pub num_ortho_const: usize,
    pub max_basis_size: usize,
    pub min_restart_size: usize,
    pub max_block_size: usize,
    pub max_prev_retain: usize,

    pub target: Target,
    pub target_shifts: Vec<R>,
    pub projection: Projection,
    pub locking: Locking,
    pub dynamic_switch: DynamicSwitchConfig,
    pub correction: CorrectionConfig,

    pub eps: R,
    pub a_norm: Option<R>,

    pub max_matvecs: usize,
    pub max_outer_iterations: usize,

    pub iseed: [u32; 4],
}

impl<R: num_traits::Float> DavidsonConfig<R> {
    /// Sensible defaults for a dense Rayleigh-Ritz solve without locking.
    pub fn new(num_evals: usize) -> Self {
        DavidsonConfig {
            num_evals,
            num_ortho_const: 0,
            max_basis_size: (num_evals * 5).max(20),
            min_restart_size: (num_evals * 2).max(4),
            max_block_size: num_evals.min(4).max(1),
            max_prev_retain: 4,

            target: Target::Smallest,
            target_shifts: Vec::new(),
            projection: Projection::RayleighRitz,
            locking: Locking::Off,
            dynamic_switch: DynamicSwitchConfig::Off,
            correction: CorrectionConfig::default(),

            eps: R::from(1e-10).unwrap(),
            a_norm: None,

            max_matvecs: 100_000,
            max_outer_iterations: 10_000,

            iseed: [1, 2, 3, 4],
        }
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn target_shifts(mut self, shifts: Vec<R>) -> Self {
        self.target_shifts = shifts;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn locking(mut self, locking: Locking) -> Self {
        self.locking = locking;
        self
    }

    pub fn dynamic_switch(mut self, dynamic_switch: DynamicSwitchConfig) -> Self {
        self.dynamic_switch = dynamic_switch;
        self
    }

    pub fn correction(mut self, correction: CorrectionConfig) -> Self {
        self.correction = correction;
        self
    }

    pub fn max_basis_size(mut self, max_basis_size: usize) -> Self {
        self.max_basis_size = max_basis_size;
        self
    }

    pub fn min_restart_size(mut self, min_restart_size: usize) -> Self {
        self.min_restart_size = min_restart_size;
        self
    }

    pub fn max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    pub fn max_prev_retain(mut self, max_prev_retain: usize) -> Self {
        self.max_prev_retain = max_prev_retain;
        self
    }

    pub fn num_ortho_const(mut self, num_ortho_const: usize) -> Self {
        self.num_ortho_const = num_ortho_const;
        self
    }

    pub fn eps(mut self, eps: R) -> Self {
        self.eps = eps;
        self
    }

    pub fn a_norm(mut self, a_norm: R) -> Self {
        self.a_norm = Some(a_norm);
        self
    }

    pub fn max_matvecs(mut self, max_matvecs: usize) -> Self {
        self.max_matvecs = max_matvecs;
        self
    }

    pub fn max_outer_iterations(mut self, max_outer_iterations: usize) -> Self {
        self.max_outer_iterations = max_outer_iterations;
        self
    }

    pub fn iseed(mut self, iseed: [u32; 4]) -> Self {
        self.iseed = iseed;
        self
    }

    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        if self.min_restart_size > self.max_basis_size {
            return Err(crate::error::DavidsonError::InvalidConfig(format!(
                "min_restart_size ({}) > max_basis_size ({})",
                self.min_restart_size, self.max_basis_size
            )));
        }
        if self.max_block_size == 0 {
            return Err(crate::error::DavidsonError::InvalidConfig(
                "max_block_size must be >= 1".into(),
            ));
        }
        if self.num_evals == 0 {
            return Ok(());
        }
        Ok(())
    }
}
