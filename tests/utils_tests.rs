use embedlinker::utils::{
    DEFAULT_CODE_LENGTH, IdGenerator, RandomIdGenerator, generate_random_code,
};
use std::collections::HashSet;

const URL_SAFE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

#[test]
fn test_generate_random_code_length() {
    for length in [0, 1, 7, 21, 64] {
        assert_eq!(generate_random_code(length).len(), length);
    }
}

#[test]
fn test_generate_random_code_alphabet() {
    let code = generate_random_code(512);
    assert!(code.chars().all(|c| URL_SAFE.contains(c)));
}

#[test]
fn test_generate_random_code_is_random() {
    let codes: HashSet<String> = (0..1000).map(|_| generate_random_code(12)).collect();
    assert_eq!(codes.len(), 1000);
}

#[test]
fn test_random_id_generator_default() {
    let generator = RandomIdGenerator::default();
    assert_eq!(generator.length(), DEFAULT_CODE_LENGTH);
    assert_eq!(generator.generate().len(), DEFAULT_CODE_LENGTH);
}

#[test]
fn test_random_id_generator_as_trait_object() {
    let generator: Box<dyn IdGenerator> = Box::new(RandomIdGenerator::new(4));
    assert_eq!(generator.generate().len(), 4);
}
