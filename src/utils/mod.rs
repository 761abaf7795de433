//! 工具函数：短码生成

/// 短码字符集（与 nanoid 相同的 URL 安全字母表）
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// 默认短码长度
pub const DEFAULT_CODE_LENGTH: usize = 7;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 短码生成器
///
/// 存储层只负责保存，不检查冲突：生成结果的唯一性由实现方保证。
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 基于随机字母表的生成器
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generator_length() {
        let generator = RandomIdGenerator::default();
        assert_eq!(generator.length(), 7);
        assert_eq!(generator.generate().len(), 7);
    }

    #[test]
    fn test_generated_code_is_url_safe() {
        let code = generate_random_code(256);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        );
    }

    #[test]
    fn test_generator_is_object_safe() {
        let generator: Box<dyn IdGenerator> = Box::new(RandomIdGenerator::new(12));
        assert_eq!(generator.generate().len(), 12);
    }
}
