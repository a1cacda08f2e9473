/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! A derivative-free, single-variable Nelder-Mead simplex search.
//!
//! In one dimension the simplex is just two points: the best one
//! and the worst one. On each iteration the worst point is reflected
//! through the best one, and then the simplex is expanded, contracted
//! or shrunk depending on how good the reflected point is.

use crate::config::SolverOptions;
use crate::Float;
use std::cell::Cell;

/// Reflection coefficient
const RHO: Float = 1.;
/// Expansion coefficient
const CHI: Float = 2.;
/// Contraction coefficient
const PSI: Float = 0.5;
/// Shrink coefficient
const SIGMA: Float = 0.5;

/// Relative size of the initial simplex
const NONZERO_DELTA: Float = 0.05;
/// Size of the initial simplex when starting from zero
const ZERO_DELTA: Float = 0.00025;

/// The outcome of a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeResult {
    /// The best point found
    pub x: Float,

    /// The value of the objective at `x`
    pub f_min: Float,

    /// Number of iterations performed
    pub iterations: usize,

    /// Number of times the objective was evaluated
    pub evaluations: usize,

    /// Whether the tolerances were met before running
    /// out of iterations or evaluations
    pub converged: bool,
}

/// Minimizes `f` starting from `x0`.
///
/// The search never fails: if it runs out of budget it returns the
/// best point it found with `converged` set to `false`, and it is up
/// to the caller to decide what that means.
pub fn minimize<F: Fn(Float) -> Float>(f: F, x0: Float, options: &SolverOptions) -> MinimizeResult {
    let evaluations = Cell::new(0);
    let eval = |x: Float| -> Float {
        evaluations.set(evaluations.get() + 1);
        f(x)
    };

    let x1 = if x0 != 0. {
        (1. + NONZERO_DELTA) * x0
    } else {
        ZERO_DELTA
    };

    // sim[0] is always the best point
    let mut sim = [x0, x1];
    let mut fsim = [eval(x0), eval(x1)];
    sort(&mut sim, &mut fsim);

    let mut iterations = 1;
    let mut converged = false;
    while evaluations.get() < options.max_evaluations && iterations < options.max_iterations {
        if (sim[1] - sim[0]).abs() <= options.x_tolerance
            && (fsim[1] - fsim[0]).abs() <= options.f_tolerance
        {
            converged = true;
            break;
        }

        let xbar = sim[0];
        let xr = (1. + RHO) * xbar - RHO * sim[1];
        let fxr = eval(xr);
        let mut do_shrink = false;

        if fxr < fsim[0] {
            let xe = (1. + RHO * CHI) * xbar - RHO * CHI * sim[1];
            let fxe = eval(xe);
            if fxe < fxr {
                sim[1] = xe;
                fsim[1] = fxe;
            } else {
                sim[1] = xr;
                fsim[1] = fxr;
            }
        } else if fxr < fsim[1] {
            // outside contraction
            let xc = (1. + PSI * RHO) * xbar - PSI * RHO * sim[1];
            let fxc = eval(xc);
            if fxc <= fxr {
                sim[1] = xc;
                fsim[1] = fxc;
            } else {
                do_shrink = true;
            }
        } else {
            // inside contraction
            let xcc = (1. - PSI) * xbar + PSI * sim[1];
            let fxcc = eval(xcc);
            if fxcc < fsim[1] {
                sim[1] = xcc;
                fsim[1] = fxcc;
            } else {
                do_shrink = true;
            }
        }

        if do_shrink {
            sim[1] = sim[0] + SIGMA * (sim[1] - sim[0]);
            fsim[1] = eval(sim[1]);
        }

        sort(&mut sim, &mut fsim);
        iterations += 1;
    }

    // The budget may run out exactly when the tolerances are met
    if !converged
        && (sim[1] - sim[0]).abs() <= options.x_tolerance
        && (fsim[1] - fsim[0]).abs() <= options.f_tolerance
    {
        converged = true;
    }

    MinimizeResult {
        x: sim[0],
        f_min: fsim[0],
        iterations,
        evaluations: evaluations.get(),
        converged,
    }
}

/// Puts the best point first. NaNs are treated as worst.
fn sort(sim: &mut [Float; 2], fsim: &mut [Float; 2]) {
    let swap = fsim[1] < fsim[0] || (fsim[0].is_nan() && !fsim[1].is_nan());
    if swap {
        sim.swap(0, 1);
        fsim.swap(0, 1);
    }
}

/***********/
/* TESTING */
/***********/
