use std::str::FromStr;

/// Deepest parenthesis nesting accepted in an expression
const MAX_NESTING_DEPTH: usize = 64;

/// Most license identifiers accepted in one expression
const MAX_LICENSE_TERMS: usize = 256;

/// Parsed SPDX license expression
///
/// Supports license identifiers (including `LicenseRef-`/`DocumentRef-` forms and
/// the `+` suffix), `WITH` exceptions, `AND`, `OR` and parentheses. `AND` binds
/// tighter than `OR`. Operators are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpdxExpression {
    License {
        id: String,
        exception: Option<String>,
    },
    And(Box<SpdxExpression>, Box<SpdxExpression>),
    Or(Box<SpdxExpression>, Box<SpdxExpression>),
}

impl SpdxExpression {
    /// Parses a license string; an error means the license cannot be evaluated
    pub fn parse(input: &str) -> Result<Self, String> {
        let tokens = tokenize(input)?;
        let terms = tokens.iter().filter(|t| matches!(t, Token::Id(_))).count();
        if terms > MAX_LICENSE_TERMS {
            return Err(format!(
                "License expression has {} terms (limit {})",
                terms, MAX_LICENSE_TERMS
            ));
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_or()?;
        if let Some(token) = parser.peek() {
            return Err(format!("Unexpected token {:?} in '{}'", token, input));
        }
        Ok(expr)
    }

    /// Whether the expression can be satisfied using only identifiers for
    /// which `permitted` returns true. `OR` needs one branch, `AND` needs both.
    /// Exceptions are matched on their base license identifier.
    pub fn satisfies<F>(&self, permitted: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            SpdxExpression::License { id, .. } => permitted(id),
            SpdxExpression::And(left, right) => left.satisfies(permitted) && right.satisfies(permitted),
            SpdxExpression::Or(left, right) => left.satisfies(permitted) || right.satisfies(permitted),
        }
    }
}

impl FromStr for SpdxExpression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    And,
    Or,
    With,
    Id(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| -> Result<(), String> {
        if word.is_empty() {
            return Ok(());
        }
        let token = match word.as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "WITH" => Token::With,
            id if is_valid_identifier(id) => Token::Id(id.to_string()),
            other => return Err(format!("Invalid license identifier '{}'", other)),
        };
        tokens.push(token);
        word.clear();
        Ok(())
    };

    for ch in input.chars() {
        match ch {
            '(' | ')' => {
                flush(&mut word, &mut tokens)?;
                tokens.push(if ch == '(' { Token::Open } else { Token::Close });
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens)?,
            c => word.push(c),
        }
    }
    flush(&mut word, &mut tokens)?;

    if tokens.is_empty() {
        return Err("Empty license expression".to_string());
    }
    Ok(tokens)
}

/// idstring = 1*(ALPHA / DIGIT / "-" / ".") with an optional trailing "+",
/// or `DocumentRef-<idstring>:LicenseRef-<idstring>`
fn is_valid_identifier(id: &str) -> bool {
    fn is_idstring(s: &str) -> bool {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    }

    if let Some((document, license)) = id.split_once(':') {
        return document.starts_with("DocumentRef-")
            && is_idstring(document)
            && license.starts_with("LicenseRef-")
            && is_idstring(license);
    }

    let base = id.strip_suffix('+').unwrap_or(id);
    is_idstring(base) && base.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<SpdxExpression, String> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = SpdxExpression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<SpdxExpression, String> {
        let mut left = self.parse_with()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.parse_with()?;
            left = SpdxExpression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_with(&mut self) -> Result<SpdxExpression, String> {
        match self.next() {
            Some(Token::Open) => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(format!(
                        "Parentheses nested deeper than {} levels",
                        MAX_NESTING_DEPTH
                    ));
                }
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err("Unbalanced parentheses".to_string()),
                }
            }
            Some(Token::Id(id)) => {
                let exception = if self.peek() == Some(&Token::With) {
                    self.pos += 1;
                    match self.next() {
                        Some(Token::Id(exception)) if !exception.ends_with('+') => Some(exception),
                        _ => return Err(format!("Missing exception after '{} WITH'", id)),
                    }
                } else {
                    None
                };
                Ok(SpdxExpression::License { id, exception })
            }
            Some(token) => Err(format!("Unexpected token {:?}", token)),
            None => Err("Unexpected end of expression".to_string()),
        }
    }
}
