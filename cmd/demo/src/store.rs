//! In-memory user store used by the demo requests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serror::codes::{ERR_BAD_REQUEST, ERR_NOT_FOUND, ERR_VALIDATION};
use serror::{bail, ensure, errorf, Coder, ErrorGroup, ResultExt};

pub const ERR_USER_EXISTS: Coder = Coder::new(110001, 409, "UserExists", "");
pub const ERR_SEED_UNREADABLE: Coder = Coder::new(110002, 500, "SeedUnreadable", "");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub age: i32,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn get(&self, name: &str) -> serror::Result<&User> {
        ensure!(!name.is_empty(), ERR_BAD_REQUEST => "empty user name");
        match self.users.get(name) {
            Some(user) => Ok(user),
            None => bail!(ERR_NOT_FOUND => "user {} not found", name),
        }
    }

    pub fn create(&mut self, name: &str, age: i32) -> serror::Result<&User> {
        validate(name, age)?;
        if self.users.contains_key(name) {
            bail!(ERR_USER_EXISTS => "user {} already exists", name);
        }
        let user = User { name: name.to_string(), age };
        Ok(self.users.entry(name.to_string()).or_insert(user))
    }

    /// Load `name,age` lines. Every bad line is reported, not just the first.
    pub fn load_seed(&mut self, path: &Path) -> serror::Result<usize> {
        let text = fs::read_to_string(path)
            .wrap_with(|| format!("reading seed file {}", path.display()))
            .with_code(ERR_SEED_UNREADABLE)?;

        let mut failures = ErrorGroup::with_message("seed rejected");
        let mut loaded = 0;
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let outcome = parse_line(line).and_then(|(name, age)| self.create(name, age).map(|_| ()));
            match outcome {
                Ok(()) => loaded += 1,
                Err(err) => failures.add(err.wrap(format!("line {}", lineno + 1))),
            }
        }

        match failures.reduce() {
            Some(err) => Err(err),
            None => Ok(loaded),
        }
    }
}

fn parse_line(line: &str) -> serror::Result<(&str, i32)> {
    let Some((name, age)) = line.split_once(',') else {
        bail!(ERR_BAD_REQUEST => "expected name,age but got {:?}", line);
    };
    let age = age
        .trim()
        .parse::<i32>()
        .wrap_with(|| format!("age of {}", name.trim()))
        .with_code(ERR_BAD_REQUEST)?;
    Ok((name.trim(), age))
}

fn validate(name: &str, age: i32) -> serror::Result<()> {
    let mut problems = ErrorGroup::new();
    if name.is_empty() {
        problems.add(errorf!("name is empty"));
    }
    if name.chars().any(char::is_whitespace) {
        problems.add(errorf!("name {:?} contains whitespace", name));
    }
    if age < 0 {
        problems.add(errorf!("age {} is negative", age));
    }
    match problems.reduce() {
        Some(err) => Err(err.with_code(ERR_VALIDATION)),
        None => Ok(()),
    }
}
