// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use regex::Regex;
use std::sync::LazyLock;

use super::error::{ContainerError, ContainerResult};

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 63;

// Lowercase alphanumeric runs joined by single dashes.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]+-?)*[a-z0-9]$").expect("container name pattern is valid")
});

/// Validate a container name against the strict, object-store-grade rule.
///
/// Accepts either a `&str` or an `Option<&str>` so that an absent name can be
/// rejected the same way as a malformed one.
///
/// # Examples
///
/// ```
/// use cloud_containers::storage::name::validate_container_name;
///
/// assert!(validate_container_name("2abc").is_ok());
/// assert!(validate_container_name("ab--c").is_err());
/// assert!(validate_container_name(None).is_err());
/// ```
///
/// # Errors
///
/// Returns [`ContainerError::InvalidName`] when the name is absent, shorter
/// than 3 or longer than 63 characters, or not made of lowercase alphanumeric
/// runs separated by single dashes.
pub fn validate_container_name<'a>(name: impl Into<Option<&'a str>>) -> ContainerResult<&'a str> {
    let name = name
        .into()
        .ok_or_else(|| ContainerError::invalid_name(None, "Container names cannot be absent."))?;

    if name.len() < MIN_NAME_LEN || name.len() > MAX_NAME_LEN {
        return Err(ContainerError::invalid_name(
            Some(name),
            format!(
                "Container names must be between {} and {} characters.",
                MIN_NAME_LEN, MAX_NAME_LEN
            ),
        ));
    }

    if !NAME_PATTERN.is_match(name) {
        return Err(ContainerError::invalid_name(
            Some(name),
            "Container names may only contain lowercase letters, digits and single dashes, \
             and must start and end with a letter or digit.",
        ));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::ErrorKind;

    fn assert_invalid(name: Option<&str>) {
        match validate_container_name(name) {
            Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidName, "name={:?}", name),
            Ok(_) => panic!("Expected {:?} to be rejected", name),
        }
    }

    #[test]
    fn test_valid_characters() {
        for name in ["abc", "abc1", "ab-c", "a-b-c", "0-9"] {
            assert!(validate_container_name(name).is_ok(), "name={}", name);
        }
    }

    #[test]
    fn test_leading_digit_is_valid() {
        assert_eq!(validate_container_name("2abc").unwrap(), "2abc");
    }

    #[test]
    fn test_length_boundaries() {
        assert!(validate_container_name("abc").is_ok());
        assert!(validate_container_name("a".repeat(63).as_str()).is_ok());

        assert_invalid(Some("ab"));
        assert_invalid(Some(&"a".repeat(64)));
        assert_invalid(Some(""));
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["ab!c", "ab@c", "Abc", "ab_c", "ab.c", "ab c", "abç"] {
            assert_invalid(Some(name));
        }
    }

    #[test]
    fn test_dash_placement() {
        assert_invalid(Some("-abc"));
        assert_invalid(Some("abc-"));
        assert_invalid(Some("ab--c"));
        assert_invalid(Some("---"));
    }

    #[test]
    fn test_absent_name() {
        assert_invalid(None);
    }

    #[test]
    fn test_length_error_message() {
        let err = validate_container_name("ab").unwrap_err();
        assert!(err.to_string().contains("between 3 and 63"));
    }
}
