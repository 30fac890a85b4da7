//! Galois field GF(2^n) arithmetic and polynomials over it

use std::fmt;
use std::sync::OnceLock;

use crate::error::{QrError, Result};

/// A finite field GF(size) described by its primitive polynomial.
///
/// Built once and shared by reference; every [`GenericGFPoly`] borrows the
/// field it lives in.
pub struct GenericGF {
    exp_table: Vec<u16>,
    log_table: Vec<u16>,
    size: usize,
    primitive: u32,
    generator_base: u32,
}

static QR_CODE_FIELD_256: OnceLock<GenericGF> = OnceLock::new();

/// GF(256) with primitive x^8 + x^4 + x^3 + x^2 + 1 and generator base 0
pub fn qr_code_field_256() -> &'static GenericGF {
    QR_CODE_FIELD_256.get_or_init(|| GenericGF::new(0x011D, 256, 0))
}

impl GenericGF {
    /// Build exp/log tables for the field defined by `primitive`.
    ///
    /// `size` is a power of two; `generator_base` is the exponent of the first
    /// root of the code's generator polynomial.
    pub fn new(primitive: u32, size: usize, generator_base: u32) -> Self {
        let mut exp_table = vec![0u16; size];
        let mut log_table = vec![0u16; size];
        let mut x: u32 = 1;
        for entry in exp_table.iter_mut() {
            *entry = x as u16;
            x *= 2;
            if x as usize >= size {
                x ^= primitive;
                x &= size as u32 - 1;
            }
        }
        for i in 0..size - 1 {
            log_table[exp_table[i] as usize] = i as u16;
        }
        Self {
            exp_table,
            log_table,
            size,
            primitive,
            generator_base,
        }
    }

    /// The zero polynomial
    pub fn zero(&self) -> GenericGFPoly<'_> {
        GenericGFPoly {
            field: self,
            coefficients: vec![0],
        }
    }

    /// The constant polynomial 1
    pub fn one(&self) -> GenericGFPoly<'_> {
        GenericGFPoly {
            field: self,
            coefficients: vec![1],
        }
    }

    /// `coefficient * x^degree`
    pub fn build_monomial(&self, degree: usize, coefficient: u16) -> GenericGFPoly<'_> {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0u16; degree + 1];
        coefficients[0] = coefficient;
        GenericGFPoly {
            field: self,
            coefficients,
        }
    }

    /// Addition and subtraction are both XOR in characteristic 2
    #[inline]
    pub fn add_or_subtract(a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// 2 to the power of `a`
    #[inline]
    pub fn exp(&self, a: usize) -> u16 {
        self.exp_table[a % (self.size - 1)]
    }

    /// Base-2 logarithm of `a`
    pub fn log(&self, a: u16) -> Result<u16> {
        if a == 0 {
            return Err(QrError::IllegalArgument("log(0) is undefined"));
        }
        Ok(self.log_table[a as usize])
    }

    /// Multiplicative inverse of `a`
    pub fn inverse(&self, a: u16) -> Result<u16> {
        if a == 0 {
            return Err(QrError::IllegalArgument("0 has no inverse"));
        }
        Ok(self.exp_table[self.size - self.log_table[a as usize] as usize - 1])
    }

    /// Product of `a` and `b`
    #[inline]
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[sum % (self.size - 1)]
    }

    /// Number of field elements
    pub fn size(&self) -> usize {
        self.size
    }

    /// Exponent of the first generator root
    pub fn generator_base(&self) -> u32 {
        self.generator_base
    }
}

impl fmt::Debug for GenericGF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(0x{:X},{})", self.primitive, self.size)
    }
}

/// Immutable polynomial over a [`GenericGF`], coefficients most significant first.
///
/// The leading coefficient is non-zero unless the polynomial is the constant 0.
#[derive(Clone)]
pub struct GenericGFPoly<'f> {
    field: &'f GenericGF,
    coefficients: Vec<u16>,
}

impl<'f> GenericGFPoly<'f> {
    /// Build a polynomial, stripping leading zero coefficients
    pub fn new(field: &'f GenericGF, coefficients: &[u16]) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(QrError::IllegalArgument("polynomial needs at least one coefficient"));
        }
        let first_non_zero = coefficients.iter().position(|&c| c != 0);
        let coefficients = match first_non_zero {
            Some(start) => coefficients[start..].to_vec(),
            None => vec![0],
        };
        Ok(Self {
            field,
            coefficients,
        })
    }

    fn from_normalized(field: &'f GenericGF, coefficients: Vec<u16>) -> Self {
        let leading = coefficients.iter().take_while(|&&c| c == 0).count();
        let coefficients = if leading == coefficients.len() {
            vec![0]
        } else if leading > 0 {
            coefficients[leading..].to_vec()
        } else {
            coefficients
        };
        Self {
            field,
            coefficients,
        }
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    /// Degree of the polynomial (0 for constants, including zero)
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// True for the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of the x^degree term
    pub fn coefficient(&self, degree: usize) -> u16 {
        if degree > self.degree() {
            return 0;
        }
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    /// Evaluate at `a` with Horner's rule
    pub fn evaluate_at(&self, a: u16) -> u16 {
        if a == 0 {
            return self.coefficient(0);
        }
        if a == 1 {
            return self
                .coefficients
                .iter()
                .fold(0, |acc, &c| GenericGF::add_or_subtract(acc, c));
        }
        self.coefficients
            .iter()
            .fold(0, |acc, &c| GenericGF::add_or_subtract(self.field.multiply(a, acc), c))
    }

    /// Sum (equivalently difference) of two polynomials
    pub fn add_or_subtract(&self, other: &GenericGFPoly<'f>) -> GenericGFPoly<'f> {
        debug_assert!(std::ptr::eq(self.field, other.field));
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };
        let diff = larger.len() - smaller.len();
        let mut sum = larger[..diff].to_vec();
        sum.extend(
            smaller
                .iter()
                .zip(&larger[diff..])
                .map(|(&a, &b)| GenericGF::add_or_subtract(a, b)),
        );
        Self::from_normalized(self.field, sum)
    }

    /// Product of two polynomials
    pub fn multiply(&self, other: &GenericGFPoly<'f>) -> GenericGFPoly<'f> {
        debug_assert!(std::ptr::eq(self.field, other.field));
        if self.is_zero() || other.is_zero() {
            return self.field.zero();
        }
        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0u16; a.len() + b.len() - 1];
        for (i, &a_coeff) in a.iter().enumerate() {
            for (j, &b_coeff) in b.iter().enumerate() {
                product[i + j] = GenericGF::add_or_subtract(
                    product[i + j],
                    self.field.multiply(a_coeff, b_coeff),
                );
            }
        }
        Self::from_normalized(self.field, product)
    }

    /// Multiply every coefficient by `scalar`
    pub fn multiply_scalar(&self, scalar: u16) -> GenericGFPoly<'f> {
        match scalar {
            0 => self.field.zero(),
            1 => self.clone(),
            _ => Self::from_normalized(
                self.field,
                self.coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect(),
            ),
        }
    }

    /// Multiply by `coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> GenericGFPoly<'f> {
        if coefficient == 0 {
            return self.field.zero();
        }
        let mut product: Vec<u16> = self
            .coefficients
            .iter()
            .map(|&c| self.field.multiply(c, coefficient))
            .collect();
        product.resize(self.coefficients.len() + degree, 0);
        Self::from_normalized(self.field, product)
    }

    /// Polynomial long division, returning `(quotient, remainder)`
    pub fn divide(&self, other: &GenericGFPoly<'f>) -> Result<(GenericGFPoly<'f>, GenericGFPoly<'f>)> {
        debug_assert!(std::ptr::eq(self.field, other.field));
        if other.is_zero() {
            return Err(QrError::IllegalArgument("divide by zero polynomial"));
        }
        let mut quotient = self.field.zero();
        let mut remainder = self.clone();

        let denominator_leading_term = other.coefficient(other.degree());
        let inverse_denominator_leading_term = self.field.inverse(denominator_leading_term)?;

        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_difference = remainder.degree() - other.degree();
            let scale = self.field.multiply(
                remainder.coefficient(remainder.degree()),
                inverse_denominator_leading_term,
            );
            let term = other.multiply_by_monomial(degree_difference, scale);
            let iteration_quotient = self.field.build_monomial(degree_difference, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient);
            remainder = remainder.add_or_subtract(&term);
        }

        Ok((quotient, remainder))
    }
}

impl PartialEq for GenericGFPoly<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.field, other.field) && self.coefficients == other.coefficients
    }
}

impl Eq for GenericGFPoly<'_> {}

impl fmt::Debug for GenericGFPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for degree in (0..=self.degree()).rev() {
            let coefficient = self.coefficient(degree);
            if coefficient == 0 {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if coefficient != 1 || degree == 0 {
                // Non-trivial coefficients are shown as powers of alpha
                match self.field.log(coefficient) {
                    Ok(0) => f.write_str("1")?,
                    Ok(1) => f.write_str("a")?,
                    Ok(power) => write!(f, "a^{power}")?,
                    Err(_) => f.write_str("0")?,
                }
            }
            match degree {
                0 => {}
                1 => f.write_str("x")?,
                _ => write!(f, "x^{degree}")?,
            }
        }
        Ok(())
    }
}
