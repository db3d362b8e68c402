use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// Runs before deserialization so config structs use plain
/// `String`/`SecretString` fields. A placeholder naming an unset
/// variable is an error; config files are expected to set defaults in
/// the deployment environment, not inline.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\{\{\s*env\.([A-Za-z0-9_]+)\s*\}\}").expect("must be valid regex"))
    }

    let mut output = String::with_capacity(input.len());
    let mut last_end = 0;

    for captures in re().captures_iter(input) {
        let overall = captures.get(0).expect("capture 0 always present");
        let var_name = &captures[1];

        output.push_str(&input[last_end..overall.start()]);

        match std::env::var(var_name) {
            Ok(value) => output.push_str(&value),
            Err(_) => return Err(format!("environment variable not found: `{var_name}`")),
        }

        last_end = overall.end();
    }

    output.push_str(&input[last_end..]);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_without_placeholders() {
        let input = "key = \"value\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_single_variable() {
        temp_env::with_var("CAPGEN_TEST_SECRET", Some("s3cret"), || {
            let result = expand_env("jwt_secret = \"{{ env.CAPGEN_TEST_SECRET }}\"").unwrap();
            assert_eq!(result, "jwt_secret = \"s3cret\"");
        });
    }

    #[test]
    fn expands_multiple_variables() {
        let vars = [("CAPGEN_TEST_A", Some("a")), ("CAPGEN_TEST_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("x = \"{{ env.CAPGEN_TEST_A }}\"\ny = \"{{ env.CAPGEN_TEST_B }}\"").unwrap();
            assert_eq!(result, "x = \"a\"\ny = \"b\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("CAPGEN_TEST_MISSING", || {
            let err = expand_env("key = \"{{ env.CAPGEN_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("CAPGEN_TEST_MISSING"));
        });
    }

    #[test]
    fn surrounding_text_is_preserved() {
        temp_env::with_var("CAPGEN_TEST_HOST", Some("db.internal"), || {
            let result = expand_env("url = \"postgres://{{ env.CAPGEN_TEST_HOST }}:5432/capgen\"").unwrap();
            assert_eq!(result, "url = \"postgres://db.internal:5432/capgen\"");
        });
    }
}
