//! Reed-Solomon error correction over a [`GenericGF`]
//! Euclidean algorithm for the error locator, Chien search, Forney's formula

use tracing::trace;

use super::galois::{GenericGF, GenericGFPoly};
use crate::error::{QrError, Result};

/// Reed-Solomon decoder bound to one field
pub struct ReedSolomonDecoder<'f> {
    field: &'f GenericGF,
}

impl<'f> ReedSolomonDecoder<'f> {
    /// Decoder over `field`
    pub fn new(field: &'f GenericGF) -> Self {
        Self { field }
    }

    /// Correct `received` in place, given `two_s` error-correction codewords.
    ///
    /// Returns the number of symbols corrected.
    pub fn decode(&self, received: &mut [u16], two_s: usize) -> Result<usize> {
        let field = self.field;
        let poly = GenericGFPoly::new(field, received)?;

        let mut syndrome_coefficients = vec![0u16; two_s];
        let mut no_error = true;
        for i in 0..two_s {
            let eval = poly.evaluate_at(field.exp(i + field.generator_base() as usize));
            syndrome_coefficients[two_s - 1 - i] = eval;
            if eval != 0 {
                no_error = false;
            }
        }
        if no_error {
            return Ok(0);
        }

        let syndrome = GenericGFPoly::new(field, &syndrome_coefficients)?;
        let (sigma, omega) =
            self.run_euclidean_algorithm(field.build_monomial(two_s, 1), syndrome, two_s)?;
        let error_locations = self.find_error_locations(&sigma)?;
        let error_magnitudes = self.find_error_magnitudes(&omega, &error_locations)?;

        for (&location, &magnitude) in error_locations.iter().zip(&error_magnitudes) {
            let position = received.len() as i64 - 1 - field.log(location)? as i64;
            if position < 0 {
                return Err(QrError::ChecksumError("bad error location"));
            }
            let position = position as usize;
            received[position] = GenericGF::add_or_subtract(received[position], magnitude);
        }
        trace!(corrected = error_locations.len(), "reed-solomon block repaired");
        Ok(error_locations.len())
    }

    /// Returns `(sigma, omega)`: error locator and evaluator, normalized so sigma(0) = 1.
    fn run_euclidean_algorithm(
        &self,
        a: GenericGFPoly<'f>,
        b: GenericGFPoly<'f>,
        r_degree: usize,
    ) -> Result<(GenericGFPoly<'f>, GenericGFPoly<'f>)> {
        let field = self.field;
        let (a, b) = if a.degree() < b.degree() { (b, a) } else { (a, b) };

        let mut r_last = a;
        let mut r = b;
        let mut t_last = field.zero();
        let mut t = field.one();

        while r.degree() >= r_degree / 2 {
            let r_last_last = r_last;
            let t_last_last = t_last;
            r_last = r;
            t_last = t;

            if r_last.is_zero() {
                return Err(QrError::ChecksumError("r_{i-1} was zero"));
            }
            r = r_last_last;
            let mut q = field.zero();
            let denominator_leading_term = r_last.coefficient(r_last.degree());
            let dlt_inverse = field.inverse(denominator_leading_term)?;
            while r.degree() >= r_last.degree() && !r.is_zero() {
                let degree_diff = r.degree() - r_last.degree();
                let scale = field.multiply(r.coefficient(r.degree()), dlt_inverse);
                q = q.add_or_subtract(&field.build_monomial(degree_diff, scale));
                r = r.add_or_subtract(&r_last.multiply_by_monomial(degree_diff, scale));
            }

            t = q.multiply(&t_last).add_or_subtract(&t_last_last);

            if r.degree() >= r_last.degree() {
                return Err(QrError::ChecksumError(
                    "division algorithm failed to reduce polynomial",
                ));
            }
        }

        let sigma_tilde_at_zero = t.coefficient(0);
        if sigma_tilde_at_zero == 0 {
            return Err(QrError::ChecksumError("sigma tilde(0) was zero"));
        }
        let inverse = field.inverse(sigma_tilde_at_zero)?;
        Ok((t.multiply_scalar(inverse), r.multiply_scalar(inverse)))
    }

    /// Chien search: the inverses of the roots of the error locator.
    fn find_error_locations(&self, error_locator: &GenericGFPoly<'f>) -> Result<Vec<u16>> {
        let num_errors = error_locator.degree();
        if num_errors == 1 {
            return Ok(vec![error_locator.coefficient(1)]);
        }
        let mut result = Vec::with_capacity(num_errors);
        for i in 1..self.field.size() {
            if result.len() >= num_errors {
                break;
            }
            if error_locator.evaluate_at(i as u16) == 0 {
                result.push(self.field.inverse(i as u16)?);
            }
        }
        if result.len() != num_errors {
            return Err(QrError::ChecksumError(
                "error locator degree does not match number of roots",
            ));
        }
        Ok(result)
    }

    /// Forney's formula for the error values at each location.
    fn find_error_magnitudes(
        &self,
        error_evaluator: &GenericGFPoly<'f>,
        error_locations: &[u16],
    ) -> Result<Vec<u16>> {
        let field = self.field;
        let mut result = Vec::with_capacity(error_locations.len());
        for (i, &location) in error_locations.iter().enumerate() {
            let xi_inverse = field.inverse(location)?;
            let mut denominator = 1u16;
            for (j, &other) in error_locations.iter().enumerate() {
                if i != j {
                    let term = field.multiply(other, xi_inverse);
                    denominator = field.multiply(denominator, GenericGF::add_or_subtract(1, term));
                }
            }
            let mut magnitude = field.multiply(
                error_evaluator.evaluate_at(xi_inverse),
                field.inverse(denominator)?,
            );
            if field.generator_base() != 0 {
                magnitude = field.multiply(magnitude, xi_inverse);
            }
            result.push(magnitude);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::galois::qr_code_field_256;
    use proptest::prelude::*;

    /// RS encoder for testing: appends `num_ecc` check symbols to `data`.
    /// Generator polynomial has roots alpha^0 .. alpha^(num_ecc-1).
    fn rs_encode(data: &[u16], num_ecc: usize) -> Vec<u16> {
        let field = qr_code_field_256();
        let mut generator = field.one();
        for i in 0..num_ecc {
            let factor = GenericGFPoly::new(field, &[1, field.exp(i)]).unwrap();
            generator = generator.multiply(&factor);
        }
        let info = GenericGFPoly::new(field, data)
            .unwrap()
            .multiply_by_monomial(num_ecc, 1);
        let (_, remainder) = info.divide(&generator).unwrap();

        let mut codeword = data.to_vec();
        let padding = num_ecc - remainder.coefficients().len();
        codeword.extend(std::iter::repeat_n(0, padding));
        codeword.extend_from_slice(remainder.coefficients());
        codeword
    }

    fn decoder() -> ReedSolomonDecoder<'static> {
        ReedSolomonDecoder::new(qr_code_field_256())
    }

    #[test]
    fn test_rs_encode_decode_no_errors() {
        let data = vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut codeword = rs_encode(&data, 10);
        assert_eq!(decoder().decode(&mut codeword, 10), Ok(0));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_single_error() {
        let data = vec![0x00; 10];
        let mut codeword = rs_encode(&data, 10);

        codeword[3] ^= 0xAB;

        assert_eq!(decoder().decode(&mut codeword, 10), Ok(1));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_multiple_errors() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let mut codeword = rs_encode(&data, 10);

        // Up to num_ecc/2 = 5 errors are correctable
        codeword[0] ^= 0xFF;
        codeword[4] ^= 0x42;
        codeword[7] ^= 0x13;

        assert_eq!(decoder().decode(&mut codeword, 10), Ok(3));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_errors_at_end() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = rs_encode(&data, 8);
        let total = codeword.len();

        codeword[total - 1] ^= 0xFF;
        codeword[total - 2] ^= 0x33;

        assert!(decoder().decode(&mut codeword, 8).is_ok());
        assert_eq!(codeword, rs_encode(&data, 8));
    }

    #[test]
    fn test_rs_qr_version1_block() {
        // Version 1-M "01234567" data codewords with their published check bytes
        let mut codeword: Vec<u16> = vec![
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11, 0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55,
        ];
        let expected = codeword.clone();
        assert_eq!(rs_encode(&expected[..16], 10), expected);
        codeword[0] = 0;
        codeword[10] = 0;
        assert_eq!(decoder().decode(&mut codeword, 10), Ok(2));
        assert_eq!(codeword, expected);
    }

    #[test]
    fn test_rs_too_many_errors() {
        let data: Vec<u16> = (1..=16).collect();
        let original = rs_encode(&data, 4);
        let mut codeword = original.clone();
        for b in codeword.iter_mut().take(6) {
            *b ^= 0x5A;
        }
        // Either rejected or visibly wrong, never the original payload
        match decoder().decode(&mut codeword, 4) {
            Err(QrError::ChecksumError(_)) => {}
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => assert_ne!(codeword, original),
        }
    }

    proptest! {
        #[test]
        fn prop_field_inverse_and_log(a in 1u16..256) {
            let field = qr_code_field_256();
            prop_assert_eq!(field.multiply(a, field.inverse(a).unwrap()), 1);
            prop_assert_eq!(field.exp(field.log(a).unwrap() as usize), a);
        }

        #[test]
        fn prop_field_multiply_distributes(a in 0u16..256, b in 0u16..256, c in 0u16..256) {
            let field = qr_code_field_256();
            prop_assert_eq!(field.multiply(a, b), field.multiply(b, a));
            prop_assert_eq!(
                field.multiply(a, GenericGF::add_or_subtract(b, c)),
                GenericGF::add_or_subtract(field.multiply(a, b), field.multiply(a, c))
            );
        }

        #[test]
        fn prop_poly_division(
            p in prop::collection::vec(0u16..256, 1..20),
            mut d in prop::collection::vec(0u16..256, 1..8),
        ) {
            let field = qr_code_field_256();
            d[0] = d[0].max(1);
            let p = GenericGFPoly::new(field, &p).unwrap();
            let d = GenericGFPoly::new(field, &d).unwrap();
            let (quotient, remainder) = p.divide(&d).unwrap();
            prop_assert_eq!(d.multiply(&quotient).add_or_subtract(&remainder), p);
            prop_assert!(remainder.is_zero() || remainder.degree() < d.degree() || d.degree() == 0);
        }

        #[test]
        fn prop_rs_corrects_up_to_half(
            data in prop::collection::vec(0u16..256, 1..40),
            ecc in 2usize..20,
            errors in prop::collection::vec((any::<prop::sample::Index>(), 1u16..256), 0..10),
        ) {
            let original = rs_encode(&data, ecc);
            let mut received = original.clone();
            let mut touched = std::collections::HashSet::new();
            for (index, value) in errors.into_iter() {
                if touched.len() >= ecc / 2 {
                    break;
                }
                let position = index.index(received.len());
                if touched.insert(position) {
                    received[position] ^= value;
                }
            }
            let corrected = decoder().decode(&mut received, ecc).unwrap();
            prop_assert_eq!(corrected, touched.len());
            prop_assert_eq!(received, original);
        }
    }
}
