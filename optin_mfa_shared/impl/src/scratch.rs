use optin_mfa_models::factor::ScratchCode;
use optin_mfa_shared_contracts::scratch::ScratchCodeService;
use rand::{
    distributions::Uniform, prelude::Distribution, thread_rng, CryptoRng, Rng,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScratchCodeServiceImpl;

impl ScratchCodeService for ScratchCodeServiceImpl {
    fn generate_batch(&self) -> Vec<ScratchCode> {
        let mut rng = csprng();
        let mut out = Vec::with_capacity(ScratchCode::BATCH_SIZE);
        while out.len() < ScratchCode::BATCH_SIZE {
            let code = generate_code(&mut rng);
            if !out.contains(&code) {
                out.push(code);
            }
        }
        out
    }
}

fn generate_code(rng: &mut (impl Rng + CryptoRng)) -> ScratchCode {
    let len = ScratchCode::LETTERS_PREFIX + 1 + ScratchCode::DIGITS + 1 + ScratchCode::LETTERS_SUFFIX;
    let mut out = String::with_capacity(len);

    out.extend(
        letters()
            .sample_iter(&mut *rng)
            .take(ScratchCode::LETTERS_PREFIX),
    );
    out.push('-');
    out.extend(digits().sample_iter(&mut *rng).take(ScratchCode::DIGITS));
    out.push('-');
    out.extend(
        letters()
            .sample_iter(&mut *rng)
            .take(ScratchCode::LETTERS_SUFFIX),
    );

    debug_assert_eq!(out.len(), len);
    out.try_into().unwrap()
}

fn csprng() -> impl Rng + CryptoRng {
    thread_rng()
}

fn letters() -> impl Distribution<char> {
    Uniform::new(0u8, 2 * 26).map(|x| (x % 26 + if x < 26 { b'a' } else { b'A' }) as char)
}

fn digits() -> impl Distribution<char> {
    Uniform::new(0u8, 10).map(|x| (x + b'0') as char)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generate_batch() {
        // Arrange
        let sut = ScratchCodeServiceImpl;

        // Act
        let batch = sut.generate_batch();

        // Assert
        assert_eq!(batch.len(), ScratchCode::BATCH_SIZE);
        let unique = batch.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), batch.len());
    }

    #[test]
    fn batches_differ() {
        // Arrange
        let sut = ScratchCodeServiceImpl;

        // Act
        let a = sut.generate_batch();
        let b = sut.generate_batch();

        // Assert
        assert_ne!(a, b);
    }

    #[test]
    fn codes_match_format() {
        // Arrange + Act + Assert
        for _ in 0..256 {
            generate_code(&mut csprng());
        }
    }
}
