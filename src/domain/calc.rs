//! Arithmetic evaluation for the calculator widget.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '%') unary)*
//! unary  := '-' unary | '+' unary | atom
//! atom   := number | '(' expr ')' | 'sqrt' '(' expr ')'
//! ```

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Empty,
    UnexpectedChar { ch: char, pos: usize },
    UnexpectedEnd,
    UnexpectedToken { token: String, pos: usize },
    DivisionByZero,
    NegativeSqrt,
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::Empty => write!(f, "nothing to evaluate"),
            CalcError::UnexpectedChar { ch, pos } => {
                write!(f, "unexpected character '{ch}' at {pos}")
            }
            CalcError::UnexpectedEnd => write!(f, "expression ended unexpectedly"),
            CalcError::UnexpectedToken { token, pos } => {
                write!(f, "unexpected '{token}' at {pos}")
            }
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::NegativeSqrt => write!(f, "square root of a negative number"),
        }
    }
}

impl std::error::Error for CalcError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Sqrt,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Sqrt => "sqrt".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        let token = match ch {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                let text: String = chars[start..pos].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| CalcError::UnexpectedToken {
                        token: text.clone(),
                        pos: start,
                    })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            's' | 'S' => {
                let word: String = chars[pos..].iter().take(4).collect();
                if !word.eq_ignore_ascii_case("sqrt") {
                    return Err(CalcError::UnexpectedChar { ch, pos });
                }
                tokens.push((Token::Sqrt, pos));
                pos += 4;
                continue;
            }
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '*' | '×' => Token::Star,
            '/' | '÷' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(CalcError::UnexpectedChar { ch, pos }),
        };
        tokens.push((token, pos));
        pos += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    fn expect(&mut self, expected: Token) -> Result<(), CalcError> {
        match self.advance() {
            Some((token, _)) if token == expected => Ok(()),
            Some((token, pos)) => Err(CalcError::UnexpectedToken {
                token: token.describe(),
                pos,
            }),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.cursor += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.cursor += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.cursor += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.cursor += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                Some(Token::Percent) => {
                    self.cursor += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value %= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.cursor += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.cursor += 1;
                self.unary()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some((Token::Sqrt, _)) => {
                self.expect(Token::LParen)?;
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                checked_sqrt(value)
            }
            Some((token, pos)) => Err(CalcError::UnexpectedToken {
                token: token.describe(),
                pos,
            }),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

fn checked_sqrt(value: f64) -> Result<f64, CalcError> {
    if value < 0.0 {
        return Err(CalcError::NegativeSqrt);
    }
    Ok(value.sqrt())
}

pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let value = parser.expr()?;
    if let Some((token, pos)) = parser.advance() {
        return Err(CalcError::UnexpectedToken {
            token: token.describe(),
            pos,
        });
    }
    Ok(value)
}

/// Renders a result without a trailing `.0` for whole numbers.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.10}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Input line state behind the calculator keypad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    input: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, key: &str) {
        self.input.push_str(key);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// On success the line is replaced by the result; on failure it is cleared.
    pub fn evaluate(&mut self) -> Result<f64, CalcError> {
        let result = evaluate(&self.input);
        match &result {
            Ok(value) => self.input = format_result(*value),
            Err(_) => self.input.clear(),
        }
        result
    }

    pub fn sqrt(&mut self) -> Result<f64, CalcError> {
        let result = evaluate(&self.input).and_then(checked_sqrt);
        match &result {
            Ok(value) => self.input = format_result(*value),
            Err(_) => self.input.clear(),
        }
        result
    }
}
