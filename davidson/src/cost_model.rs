//! Dynamic method switching (spec §4.7): tracks the running cost of a
//! GD+k step versus a JDQMR step and flips between them when the measured
//! ratio crosses a hysteresis band, so a run started in one mode can settle
//! into whichever is actually cheaper for the problem at hand.

use num_traits::Float;

use crate::config::DynamicSwitchConfig;

/// Which correction strategy is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GdPlusK,
    Jdqmr,
}

/// The seven states of the switching state machine: four "stay unless
/// strongly contradicted" states while GD+k is active or being favored,
/// and three while JDQMR is active or being favored, numbered as in the
/// reference cost model so the state labels stay checkable against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    S1,
    S2,
    S3,
    S4,
    SNeg1,
    SNeg2,
    SNeg3,
}

/// Running rate accumulators, reset every 10 converged pairs so the
/// estimate tracks the *current* phase of convergence rather than an
/// average over the whole run.
pub struct CostModel<R> {
    config: DynamicSwitchConfig,
    state: State,
    method: Method,
    rate_gd: R,
    rate_jd: R,
    n_gd: u32,
    n_jd: u32,
    converged_since_reset: u32,
}

impl<R: Float> CostModel<R> {
    pub fn new(config: DynamicSwitchConfig) -> Self {
        let (state, method) = match config {
            DynamicSwitchConfig::Off => (State::S1, Method::GdPlusK),
            DynamicSwitchConfig::Dyn1 => (State::S1, Method::GdPlusK),
            DynamicSwitchConfig::Dyn2 => (State::S2, Method::GdPlusK),
            DynamicSwitchConfig::Dyn3 => (State::SNeg1, Method::Jdqmr),
            DynamicSwitchConfig::Dyn4 => (State::SNeg2, Method::Jdqmr),
        };
        CostModel {
            config,
            state,
            method,
            rate_gd: R::zero(),
            rate_jd: R::zero(),
            n_gd: 0,
            n_jd: 0,
            converged_since_reset: 0,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Records the cost (matvecs, say) spent on one step of the currently
    /// active method to reduce the residual by `reduction_factor` (`< 1`
    /// means progress; `>= 1` means the step made no headway).
    pub fn observe_step(&mut self, cost: R, reduction_factor: R) {
        if reduction_factor >= R::one() || reduction_factor <= R::zero() {
            return;
        }
        // rate = cost needed per unit of -log(reduction): cheaper methods
        // have a smaller rate.
        let progress = -reduction_factor.ln();
        if progress <= R::zero() {
            return;
        }
        let rate = cost / progress;
        match self.method {
            Method::GdPlusK => {
                self.n_gd += 1;
                self.rate_gd = self.rate_gd + (rate - self.rate_gd) / R::from(self.n_gd).unwrap();
            }
            Method::Jdqmr => {
                self.n_jd += 1;
                self.rate_jd = self.rate_jd + (rate - self.rate_jd) / R::from(self.n_jd).unwrap();
            }
        }
    }

    /// Called whenever a pair locks; resets the rate accumulators every 10
    /// converged pairs.
    pub fn on_converged(&mut self) {
        self.converged_since_reset += 1;
        if self.converged_since_reset >= 10 {
            self.rate_gd = R::zero();
            self.rate_jd = R::zero();
            self.n_gd = 0;
            self.n_jd = 0;
            self.converged_since_reset = 0;
        }
    }

    /// Re-evaluates which method should be active. A no-op when dynamic
    /// switching is disabled.
    pub fn update(&mut self) {
        if self.config == DynamicSwitchConfig::Off {
            return;
        }
        // First transition away from the starting method is unconditional
        // (spec §4.7): the driver only calls `observe_step` for the
        // currently active method, so the other rate accumulator stays at
        // its initial zero count forever unless the method is forced over
        // at least once to collect a timing for it.
        if self.n_gd == 0 && self.n_jd > 0 {
            self.force_method(Method::GdPlusK);
            return;
        }
        if self.n_jd == 0 && self.n_gd > 0 {
            self.force_method(Method::Jdqmr);
            return;
        }
        if self.n_gd == 0 || self.n_jd == 0 {
            return;
        }
        let ratio = self.rate_jd / self.rate_gd;
        let favor_gd = R::from(0.9).unwrap();
        let favor_jd = R::from(1.1).unwrap();

        self.state = match (self.state, ratio) {
            (State::S1, r) if r < favor_gd => State::S1,
            (State::S1, r) if r > favor_jd => State::S2,
            (State::S1, _) => State::S1,

            (State::S2, r) if r > favor_jd => State::S3,
            (State::S2, r) if r < favor_gd => State::S1,
            (State::S2, _) => State::S2,

            (State::S3, r) if r > favor_jd => State::S4,
            (State::S3, r) if r < favor_gd => State::S2,
            (State::S3, _) => State::S3,

            (State::S4, r) if r < favor_gd => State::S3,
            (State::S4, _) => State::SNeg1,

            (State::SNeg1, r) if r > R::one() / favor_gd => State::SNeg1,
            (State::SNeg1, r) if r < R::one() / favor_jd => State::SNeg2,
            (State::SNeg1, _) => State::SNeg1,

            (State::SNeg2, r) if r < R::one() / favor_jd => State::SNeg3,
            (State::SNeg2, r) if r > R::one() / favor_gd => State::SNeg1,
            (State::SNeg2, _) => State::SNeg2,

            (State::SNeg3, r) if r > R::one() / favor_gd => State::SNeg2,
            (State::SNeg3, _) => State::S4,
        };

        self.method = match self.state {
            State::S1 | State::S2 | State::S3 => Method::GdPlusK,
            State::S4 => Method::Jdqmr,
            State::SNeg1 | State::SNeg2 | State::SNeg3 => Method::Jdqmr,
        };
    }

    /// Switches the active method outright, landing on the state that maps
    /// back to that same method (`S4` for JDQMR, not `S2`) so a later
    /// `update()` call doesn't immediately derive the opposite method from
    /// `self.state` before a real ratio has even been computed.
    fn force_method(&mut self, method: Method) {
        self.method = method;
        self.state = match method {
            Method::GdPlusK => State::S1,
            Method::Jdqmr => State::S4,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_switch_always_reports_gd_plus_k() {
        let mut model = CostModel::<f64>::new(DynamicSwitchConfig::Off);
        model.observe_step(10.0, 0.01);
        model.update();
        assert_eq!(model.method(), Method::GdPlusK);
    }

    #[test]
    fn a_much_cheaper_jdqmr_rate_eventually_switches_the_method() {
        let mut model = CostModel::<f64>::new(DynamicSwitchConfig::Dyn1);
        for _ in 0..6 {
            model.observe_step(100.0, 0.01); // GD+k: expensive
            model.observe_step(1.0, 0.01); // JDQMR: cheap
            model.update();
        }
        assert_eq!(model.method(), Method::Jdqmr);
    }
}
