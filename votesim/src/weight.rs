// Copyright 2026 Andrew Conway.
// This file is part of VoteSim.
// VoteSim is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// VoteSim is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with VoteSim.  If not, see <https://www.gnu.org/licenses/>.

//! Exact ballot weights. Weights are never floating point, as fractional transfers
//! in multi round elections need to be exact.

use serde::Serialize;
use serde::Deserialize;
use num::{BigInt, BigRational, One, Signed, ToPrimitive, Zero};
use num::rational::{ParseRatioError, Ratio};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct Weight(pub(crate) BigRational);

impl Weight {
    pub fn one() -> Self { Weight(BigRational::one()) }
    pub fn zero() -> Self { Weight(BigRational::zero()) }
    pub fn new(numerator:BigInt,denominator:BigInt) -> Self {
        Weight(BigRational::new(numerator,denominator))
    }
    pub fn from_integer(n:usize) -> Self { Weight(BigRational::from_integer(BigInt::from(n))) }
    /// n/d. Panics if d is zero.
    pub fn fraction(n:i64,d:i64) -> Self { Weight::new(BigInt::from(n),BigInt::from(d)) }

    pub fn is_zero(&self) -> bool { self.0.is_zero() }
    pub fn is_negative(&self) -> bool { self.0.is_negative() }
    pub fn is_integer(&self) -> bool { self.0.is_integer() }

    /// Largest integer not greater than this.
    pub fn floor(&self) -> Self { Weight(self.0.floor()) }

    /// Approximate value, for reporting and statistics only.
    pub fn to_f64(&self) -> f64 { self.0.to_f64().unwrap_or(f64::NAN) }

    pub fn as_rational(&self) -> &BigRational { &self.0 }

    /// Divide by a whole number of parts, e.g. splitting a ballot between tied candidates.
    pub fn split(&self,parts:usize) -> Self {
        Weight(&self.0/BigRational::from_integer(BigInt::from(parts)))
    }
}

impl Default for Weight {
    fn default() -> Self { Weight::zero() }
}

impl From<BigRational> for Weight {
    fn from(r: BigRational) -> Self { Weight(r) }
}

impl From<usize> for Weight {
    fn from(n: usize) -> Self { Weight::from_integer(n) }
}

impl Add for Weight {
    type Output = Weight;
    fn add(self, rhs: Weight) -> Weight { Weight(self.0+rhs.0) }
}
impl <'a> Add<&'a Weight> for &'a Weight {
    type Output = Weight;
    fn add(self, rhs: &'a Weight) -> Weight { Weight(&self.0+&rhs.0) }
}
impl AddAssign for Weight {
    fn add_assign(&mut self, rhs: Weight) { self.0+=rhs.0; }
}
impl <'a> AddAssign<&'a Weight> for Weight {
    fn add_assign(&mut self, rhs: &'a Weight) { self.0+=&rhs.0; }
}
impl Sub for Weight {
    type Output = Weight;
    fn sub(self, rhs: Weight) -> Weight { Weight(self.0-rhs.0) }
}
impl <'a> Sub<&'a Weight> for &'a Weight {
    type Output = Weight;
    fn sub(self, rhs: &'a Weight) -> Weight { Weight(&self.0-&rhs.0) }
}
impl Mul for Weight {
    type Output = Weight;
    fn mul(self, rhs: Weight) -> Weight { Weight(self.0*rhs.0) }
}
impl <'a> Mul<&'a Weight> for &'a Weight {
    type Output = Weight;
    fn mul(self, rhs: &'a Weight) -> Weight { Weight(&self.0*&rhs.0) }
}
/// Panics on division by zero, same as BigRational.
impl Div for Weight {
    type Output = Weight;
    fn div(self, rhs: Weight) -> Weight { Weight(self.0/rhs.0) }
}
impl <'a> Div<&'a Weight> for &'a Weight {
    type Output = Weight;
    fn div(self, rhs: &'a Weight) -> Weight { Weight(&self.0/&rhs.0) }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item=Weight>>(iter: I) -> Self { iter.fold(Weight::zero(),|a,b|a+b) }
}
impl <'a> Sum<&'a Weight> for Weight {
    fn sum<I: Iterator<Item=&'a Weight>>(iter: I) -> Self {
        let mut res = Weight::zero();
        for w in iter { res+=w; }
        res
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<Weight> for String {
    fn from(t: Weight) -> Self { t.0.to_string() }
}

/// Accepts integers "3", fractions "3/2", and terminating decimals "1.25" (converted exactly).
impl FromStr for Weight {
    type Err = ParseRatioError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((whole,fraction)) = s.split_once('.') {
            if !fraction.is_empty() && fraction.chars().all(|c|c.is_ascii_digit()) {
                let digits = format!("{}{}",whole,fraction);
                let numerator = Ratio::<BigInt>::from_str(&digits)?;
                let denominator = BigRational::from_integer(num::pow(BigInt::from(10),fraction.len()));
                return Ok(Weight(numerator/denominator));
            }
        }
        Ok(Weight(Ratio::from_str(s)?))
    }
}

impl TryFrom<String> for Weight {
    type Error = ParseRatioError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}
