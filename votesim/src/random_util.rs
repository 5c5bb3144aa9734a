// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.


//! Some utility routines using pseudo-random numbers.
//!
//! Nothing in this crate uses a hidden global random source. Everything stochastic takes
//! an explicit `rng`, usually one made by [rng_from_seed].

use rand::{Rng, SeedableRng};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_chacha::ChaCha20Rng;
use rand_distr::Gamma;
use crate::errors::ValidationError;

/// The random source used by elections and, by convention, generators.
pub type Randomness = ChaCha20Rng;

/// A reproducible generator if a seed is given, otherwise one seeded from the thread-local entropy source.
/// ```
/// use rand::Rng;
/// use votesim::random_util::rng_from_seed;
/// let a : u64 = rng_from_seed(Some(7)).random();
/// let b : u64 = rng_from_seed(Some(7)).random();
/// assert_eq!(a,b);
/// ```
pub fn rng_from_seed(seed:Option<u64>) -> Randomness {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    }
}

/// Choose an index with probability proportional to the given non-negative weights.
/// If all the weights are zero, choose uniformly. Returns None iff weights is empty.
/// ```
/// use votesim::random_util::{choose_weighted_index, rng_from_seed};
/// let mut rng = rng_from_seed(Some(1));
/// assert_eq!(choose_weighted_index(&[0.0,1.0,0.0],&mut rng),Some(1));
/// assert_eq!(choose_weighted_index(&[],&mut rng),None);
/// assert!(choose_weighted_index(&[0.0,0.0],&mut rng).is_some());
/// ```
pub fn choose_weighted_index<R:Rng+?Sized>(weights:&[f64],rng:&mut R) -> Option<usize> {
    if weights.is_empty() { return None; }
    match WeightedIndex::new(weights) {
        Ok(distribution) => Some(distribution.sample(rng)),
        Err(_) => Some(rng.random_range(0..weights.len())), // all zero.
    }
}

/// A point drawn from the symmetric Dirichlet distribution of dimension `n` with parameter `alpha`.
/// Small alpha concentrates the weight on few coordinates. Alpha of zero is the limit, all weight on
/// one uniformly chosen coordinate, which is also the result if every gamma draw underflows.
pub fn dirichlet_weights<R:Rng+?Sized>(n:usize,alpha:f64,rng:&mut R) -> Result<Vec<f64>,ValidationError> {
    if !alpha.is_finite() || alpha<0.0 { return Err(ValidationError::NonPositiveAlpha(alpha)); }
    let mut weights : Vec<f64> = if alpha>0.0 {
        let gamma = Gamma::new(alpha,1.0).map_err(|_|ValidationError::NonPositiveAlpha(alpha))?;
        (0..n).map(|_|gamma.sample(rng)).collect()
    } else { vec![0.0;n] };
    let total : f64 = weights.iter().sum();
    if total>0.0 {
        for w in &mut weights { *w/=total; }
    } else if n>0 {
        weights[rng.random_range(0..n)]=1.0;
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_choice_respects_zero() {
        let mut rng = rng_from_seed(Some(42));
        for _ in 0..1000 {
            let i = choose_weighted_index(&[0.5,0.0,0.5],&mut rng).unwrap();
            assert_ne!(1,i);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = rng_from_seed(Some(3));
        let mut b = rng_from_seed(Some(3));
        let from_a : Vec<usize> = (0..20).map(|_|choose_weighted_index(&[1.0,2.0,3.0],&mut a).unwrap()).collect();
        let from_b : Vec<usize> = (0..20).map(|_|choose_weighted_index(&[1.0,2.0,3.0],&mut b).unwrap()).collect();
        assert_eq!(from_a,from_b);
    }

    #[test]
    fn test_dirichlet_weights() {
        let mut rng = rng_from_seed(Some(12));
        let w = dirichlet_weights(24,1.0,&mut rng).unwrap();
        assert_eq!(w.len(),24);
        assert!((w.iter().sum::<f64>()-1.0).abs()<1e-9);
        let corner = dirichlet_weights(24,0.0,&mut rng).unwrap();
        assert_eq!(corner.iter().filter(|v|**v==1.0).count(),1);
        assert_eq!(corner.iter().filter(|v|**v==0.0).count(),23);
        assert!(dirichlet_weights(3,-0.5,&mut rng).is_err());
        assert!(dirichlet_weights(0,1.0,&mut rng).unwrap().is_empty());
    }
}
