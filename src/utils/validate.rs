use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// 规范化邮箱：去除首尾空白并转为小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// - 长度 6 到 128 个字符
/// - 不能是常见弱密码
/// - 不能全部由空白组成
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 6 characters long");
    }

    if length > MAX_PASSWORD_LENGTH {
        errors.push("Password must be at most 128 characters long");
    }

    if !password.is_empty() && password.trim().is_empty() {
        errors.push("Password must not be blank");
    }

    let weak_passwords = [
        "password", "123456", "1234567", "12345678", "123456789", "qwerty", "qwerty123",
        "abc123", "111111", "password1", "iloveyou",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("gpa4life").is_valid);
        assert!(validate_password("SecureP@ss1").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 6 characters long")
        );
    }

    #[test]
    fn test_blank_password() {
        let result = validate_password("        ");
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Password must not be blank"));
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password");
        assert!(!result.is_valid);
        assert_eq!(
            result.error_message(),
            "Password is too common, please choose a stronger password"
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("student@uni.ac.lk").is_ok());
        assert!(validate_email("first.last+tag@example.com").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Student@Example.COM "), "student@example.com");
    }
}
