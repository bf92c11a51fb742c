//! Safe arithmetic evaluation.
//!
//! A small recursive-descent evaluator over numbers, `+ - * / % **`,
//! parentheses and a handful of math functions. Anything else (names, dice
//! terms such as `1d4`, unresolved `@` references) is an error; nothing is
//! ever executed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character `{ch}` at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unexpected token {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown name `{0}`")]
    UnknownName(String),

    #[error("`{name}` takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// Nesting bound for parentheses, signs and exponents.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
}

/// Evaluate an arithmetic expression to a finite number.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if let Some(token) = parser.peek() {
        return Err(EvalError::UnexpectedToken(format!("{token:?}")));
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        match ch {
            c if c.is_whitespace() => pos += 1,
            '0'..='9' | '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                pos += exponent_len(&chars[pos..]);
                let text: String = chars[start..pos].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                    pos += 1;
                }
                tokens.push(Token::Name(chars[start..pos].iter().collect()));
            }
            '*' if chars.get(pos + 1) == Some(&'*') => {
                tokens.push(Token::StarStar);
                pos += 2;
            }
            _ => {
                let token = match ch {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    _ => return Err(EvalError::UnexpectedChar { ch, pos }),
                };
                tokens.push(token);
                pos += 1;
            }
        }
    }

    Ok(tokens)
}

/// Length of an exponent suffix (`e3`, `E-2`) at the start of `rest`, or 0.
fn exponent_len(rest: &[char]) -> usize {
    let sign = match rest {
        ['e' | 'E', '+' | '-', ..] => 1,
        ['e' | 'E', ..] => 0,
        _ => return 0,
    };
    let digits = rest[1 + sign..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
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

    fn next(&mut self) -> Result<Token, EvalError> {
        let token = self.tokens.get(self.pos).cloned().ok_or(EvalError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), EvalError> {
        match self.next()? {
            token if token == *expected => Ok(()),
            token => Err(EvalError::UnexpectedToken(format!("{token:?}"))),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<f64, EvalError>) -> Result<f64, EvalError> {
        if self.depth == MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        self.nested(Self::sum)
    }

    // sum := term (('+' | '-') term)*
    fn sum(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term()?;
            } else if self.eat(&Token::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                value *= self.unary()?;
            } else if self.eat(&Token::Slash) {
                value /= self.unary()?;
            } else if self.eat(&Token::Percent) {
                value %= self.unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        self.nested(Self::signed)
    }

    // signed := ('+' | '-') unary | power
    fn signed(&mut self) -> Result<f64, EvalError> {
        if self.eat(&Token::Minus) {
            return Ok(-self.unary()?);
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    // power := primary ('**' unary)?   (right associative)
    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.eat(&Token::StarStar) {
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    // primary := number | '(' expression ')' | name '(' arguments ')'
    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next()? {
            Token::Number(value) => Ok(value),
            Token::LParen => {
                let value = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            Token::Name(name) => {
                if !self.eat(&Token::LParen) {
                    return Err(EvalError::UnknownName(name));
                }
                let args = self.arguments()?;
                call(&name, &args)
            }
            token => Err(EvalError::UnexpectedToken(format!("{token:?}"))),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, EvalError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            return Ok(args);
        }
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    let unary = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(EvalError::Arity {
            name: name.to_string(),
            expected: "1",
            found: args.len(),
        }),
    };

    match name {
        "abs" => unary(f64::abs),
        "ceil" => unary(f64::ceil),
        "floor" => unary(f64::floor),
        "trunc" => unary(f64::trunc),
        "sqrt" => unary(f64::sqrt),
        // Halves round towards positive infinity.
        "round" => unary(|x| (x + 0.5).floor()),
        "min" | "max" => {
            if args.is_empty() {
                return Err(EvalError::Arity {
                    name: name.to_string(),
                    expected: "1 or more",
                    found: 0,
                });
            }
            let fold = if name == "min" { f64::min } else { f64::max };
            Ok(args.iter().copied().fold(args[0], fold))
        }
        _ => Err(EvalError::UnknownName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", 3.0)]
    #[case("2+1", 3.0)]
    #[case(" 2 * (3 + 4) ", 14.0)]
    #[case("10 - 4 - 3", 3.0)]
    #[case("7 % 4", 3.0)]
    #[case("-2 + 5", 3.0)]
    #[case("2 ** 3 ** 2", 512.0)]
    #[case("-2 ** 2", -4.0)]
    #[case(".5 * 4", 2.0)]
    #[case("floor(7 / 2)", 3.0)]
    #[case("max(1, 4, 2) + min(3, 0)", 4.0)]
    #[case("round(2.5) + round(-2.5)", 1.0)]
    #[case("abs(-3)", 3.0)]
    #[case("1e3", 1000.0)]
    #[case("2.5E-1 * 4", 1.0)]
    #[case("1e+2 + 1", 101.0)]
    #[case("((((((((1))))))))", 1.0)]
    fn test_evaluates(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(evaluate(input).unwrap(), expected);
    }

    #[rstest]
    #[case("", EvalError::Empty)]
    #[case("   ", EvalError::Empty)]
    #[case("abc", EvalError::UnknownName("abc".into()))]
    #[case("@abilities.str.mod", EvalError::UnexpectedChar { ch: '@', pos: 0 })]
    #[case("1 / 0", EvalError::NonFinite)]
    #[case("1.2.3", EvalError::InvalidNumber("1.2.3".into()))]
    #[case("(1 + 2", EvalError::UnexpectedEnd)]
    #[case("1 +", EvalError::UnexpectedEnd)]
    fn test_rejects(#[case] input: &str, #[case] expected: EvalError) {
        assert_eq!(evaluate(input).unwrap_err(), expected);
    }

    #[test]
    fn test_dice_terms_are_not_numbers() {
        assert!(matches!(evaluate("1d4"), Err(EvalError::UnexpectedToken(_))));
        assert!(evaluate("2d6 + 3").is_err());
    }

    #[test]
    fn test_dangling_exponent_is_not_a_number() {
        assert!(matches!(evaluate("1e"), Err(EvalError::UnexpectedToken(_))));
        assert!(matches!(evaluate("1e+"), Err(EvalError::UnexpectedToken(_))));
    }

    #[rstest]
    #[case(format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000)))]
    #[case(format!("{}1", "-".repeat(20_000)))]
    #[case(format!("2{}", " ** 2".repeat(20_000)))]
    #[case(format!("{}1{}", "abs(".repeat(20_000), ")".repeat(20_000)))]
    fn test_deep_nesting_is_an_error(#[case] input: String) {
        assert_eq!(evaluate(&input).unwrap_err(), EvalError::TooDeep(MAX_DEPTH));
    }

    #[test]
    fn test_depth_is_released_between_siblings() {
        let input = vec!["((1))"; 200].join(" + ");
        assert_eq!(evaluate(&input).unwrap(), 200.0);
    }

    #[test]
    fn test_function_arity() {
        assert!(matches!(evaluate("floor(1, 2)"), Err(EvalError::Arity { .. })));
        assert!(matches!(evaluate("max()"), Err(EvalError::Arity { .. })));
        assert!(matches!(evaluate("system()"), Err(EvalError::UnknownName(_))));
    }
}
