use serde::Deserialize;
use sqlselect::{SelectQuery, SelectQueryBuilder};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct QueryFile {
    pub path: PathBuf,
    pub file: ConfigFile,
}

impl QueryFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let file = ConfigFile::parse(&raw)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {e:#}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,

    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub name: String,

    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub from: String,

    #[serde(default, rename = "where")]
    pub filters: BTreeMap<String, String>,
}

impl QueryConfig {
    pub fn to_query(&self) -> SelectQuery {
        SelectQueryBuilder::new()
            .add_columns(self.columns.iter().cloned())
            .add_from(self.from.as_str())
            .add_where_all(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())))
            .build()
    }
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile =
            toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse TOML: {e}"))?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    pub fn find(&self, name: &str) -> Option<&QueryConfig> {
        self.queries.iter().find(|q| q.name == name)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        for q in &mut self.queries {
            q.from = expand_env_vars(&q.from)?;

            for c in &mut q.columns {
                *c = expand_env_vars(c)?;
            }

            for v in q.filters.values_mut() {
                *v = expand_env_vars(v)?;
            }
        }

        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }

        if self.queries.is_empty() {
            anyhow::bail!("at least one [[queries]] entry is required");
        }

        let mut seen = std::collections::HashSet::<&str>::new();
        for q in &self.queries {
            if q.name.trim().is_empty() {
                anyhow::bail!("queries.name must not be empty");
            }
            if !seen.insert(q.name.as_str()) {
                anyhow::bail!("duplicate queries.name: {}", q.name);
            }
        }

        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = "1"

[[queries]]
name = "contacts"
columns = ["name", "phone"]
from = "students"

[queries.where]
name = "John"
id = "42"

[[queries]]
name = "everything"
from = "students"

[[queries]]
name = "tableless"
columns = ["name"]
"#;

    #[test]
    fn parse_sample() {
        let file = ConfigFile::parse(SAMPLE).unwrap();
        assert_eq!(file.queries.len(), 3);

        let contacts = file.find("contacts").unwrap();
        assert_eq!(
            contacts.to_query().build_query(),
            "SELECT name, phone FROM students WHERE id=42 AND name=John;"
        );

        let everything = file.find("everything").unwrap();
        assert_eq!(
            everything.to_query().build_query(),
            "SELECT * FROM students;"
        );

        let tableless = file.find("tableless").unwrap();
        assert_eq!(tableless.to_query().build_query(), "");
    }

    #[test]
    fn rejects_unknown_version() {
        let err = ConfigFile::parse("version = \"2\"\n[[queries]]\nname = \"a\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn requires_queries() {
        let err = ConfigFile::parse("version = \"1\"\n").unwrap_err();
        assert!(err.to_string().contains("at least one [[queries]]"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let raw = "version = \"1\"\n[[queries]]\nname = \"a\"\n[[queries]]\nname = \"a\"\n";
        let err = ConfigFile::parse(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate queries.name: a"));
    }

    #[test]
    fn expands_env_vars() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("SQLSELECT_TEST_TABLE", "students") };
        assert_eq!(
            expand_env_vars("${SQLSELECT_TEST_TABLE}_archive").unwrap(),
            "students_archive"
        );
        assert_eq!(expand_env_vars("a=$b").unwrap(), "a=$b");
    }

    #[test]
    fn env_var_errors() {
        assert!(expand_env_vars("${}").is_err());
        assert!(expand_env_vars("${UNTERMINATED").is_err());
        assert!(expand_env_vars("${SQLSELECT_TEST_DEFINITELY_MISSING}").is_err());
    }
}
