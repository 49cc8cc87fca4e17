use crate::error::{ErrorKind, JsonError};
use crate::model::{Array, InputPosition, Object, Value};
use crate::options::ParseOptions;
use crate::tokenizer::{JsonToken, TokenGenerator, TokenType};

struct TokenCursor<I>
where
    I: Iterator<Item = Result<JsonToken, JsonError>>,
{
    generator: I,
    current: Option<JsonToken>,
}

impl<I> TokenCursor<I>
where
    I: Iterator<Item = Result<JsonToken, JsonError>>,
{
    fn new(generator: I) -> Self {
        Self { generator, current: None }
    }

    fn current(&self) -> Result<&JsonToken, JsonError> {
        self.current
            .as_ref()
            .ok_or_else(|| JsonError::simple(ErrorKind::UnexpectedEndOfInput, "Illegal cursor usage"))
    }

    fn move_next(&mut self) -> Result<bool, JsonError> {
        match self.generator.next() {
            None => {
                self.current = None;
                Ok(false)
            }
            Some(Ok(token)) => {
                self.current = Some(token);
                Ok(true)
            }
            Some(Err(err)) => Err(err),
        }
    }
}

/// Recursive-descent parser turning JSON text into a [`Value`] tree.
///
/// Consumes the entire input and returns exactly one top-level value (object,
/// array, or scalar), or fails without producing any tree. It accepts both
/// compact and pretty-printed input; object key order in the input is
/// irrelevant since canonical order is re-established at insertion time.
///
/// Duplicate keys in an input object follow the overwrite-on-insert rule:
/// only the last occurrence survives.
pub struct Parser {
    pub options: ParseOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parses one complete document. Trailing non-whitespace content after
    /// the first top-level value is an error.
    pub fn parse(&self, input_json: &str) -> Result<Value, JsonError> {
        let mut cursor = TokenCursor::new(TokenGenerator::new(input_json));
        if !cursor.move_next()? {
            return Err(JsonError::simple(
                ErrorKind::UnexpectedEndOfInput,
                "Input contains no JSON value",
            ));
        }

        let value = self.parse_value(&mut cursor, 0)?;

        if cursor.move_next()? {
            let token = cursor.current()?;
            return Err(JsonError::new(
                ErrorKind::UnexpectedToken,
                "Unexpected content after top level value",
                Some(token.input_position),
            ));
        }
        Ok(value)
    }

    fn parse_value<I>(&self, cursor: &mut TokenCursor<I>, depth: usize) -> Result<Value, JsonError>
    where
        I: Iterator<Item = Result<JsonToken, JsonError>>,
    {
        let token = cursor.current()?.clone();
        match token.token_type {
            TokenType::BeginObject => self.parse_object(cursor, depth),
            TokenType::BeginArray => self.parse_array(cursor, depth),
            TokenType::Null => Ok(Value::Null),
            TokenType::True => Ok(Value::Boolean(true)),
            TokenType::False => Ok(Value::Boolean(false)),
            TokenType::String => Ok(Value::String(decode_string_token(&token)?)),
            TokenType::Number => parse_number_token(&token),
            _ => Err(JsonError::new(
                ErrorKind::UnexpectedToken,
                "Unexpected token at start of value",
                Some(token.input_position),
            )),
        }
    }

    fn parse_array<I>(&self, cursor: &mut TokenCursor<I>, depth: usize) -> Result<Value, JsonError>
    where
        I: Iterator<Item = Result<JsonToken, JsonError>>,
    {
        let starting_position = cursor.current()?.input_position;
        self.check_depth(depth, starting_position)?;

        let mut array = Array::new();
        let mut comma_status = CommaStatus::EmptyCollection;

        loop {
            let token = Self::next_token_or_fail(cursor, starting_position)?;
            match token.token_type {
                TokenType::EndArray => {
                    if comma_status == CommaStatus::CommaSeen {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Array may not end with a comma",
                            Some(token.input_position),
                        ));
                    }
                    return Ok(Value::Array(array));
                }
                TokenType::Comma => {
                    if comma_status != CommaStatus::ElementSeen {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Unexpected comma in array",
                            Some(token.input_position),
                        ));
                    }
                    comma_status = CommaStatus::CommaSeen;
                }
                TokenType::Null
                | TokenType::True
                | TokenType::False
                | TokenType::String
                | TokenType::Number
                | TokenType::BeginArray
                | TokenType::BeginObject => {
                    if comma_status == CommaStatus::ElementSeen {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Comma missing between array elements",
                            Some(token.input_position),
                        ));
                    }
                    let element = self.parse_value(cursor, depth + 1)?;
                    array.push_back(element);
                    comma_status = CommaStatus::ElementSeen;
                }
                _ => {
                    return Err(JsonError::new(
                        ErrorKind::UnexpectedToken,
                        "Unexpected token in array",
                        Some(token.input_position),
                    ));
                }
            }
        }
    }

    fn parse_object<I>(&self, cursor: &mut TokenCursor<I>, depth: usize) -> Result<Value, JsonError>
    where
        I: Iterator<Item = Result<JsonToken, JsonError>>,
    {
        let starting_position = cursor.current()?.input_position;
        self.check_depth(depth, starting_position)?;

        let mut object = Object::new();
        let mut pending_key: Option<String> = None;
        let mut phase = ObjectPhase::BeforePropName;

        loop {
            let token = Self::next_token_or_fail(cursor, starting_position)?;
            match token.token_type {
                TokenType::EndObject => {
                    match phase {
                        ObjectPhase::BeforePropName | ObjectPhase::AfterPropValue => {
                            return Ok(Value::Object(object));
                        }
                        ObjectPhase::AfterComma => {
                            return Err(JsonError::new(
                                ErrorKind::UnexpectedToken,
                                "Object may not end with a comma",
                                Some(token.input_position),
                            ));
                        }
                        _ => {
                            return Err(JsonError::new(
                                ErrorKind::UnexpectedToken,
                                "Unexpected end of object",
                                Some(token.input_position),
                            ));
                        }
                    }
                }
                TokenType::String => match phase {
                    ObjectPhase::BeforePropName | ObjectPhase::AfterComma => {
                        pending_key = Some(decode_string_token(&token)?);
                        phase = ObjectPhase::AfterPropName;
                    }
                    ObjectPhase::AfterColon => {
                        let value = self.parse_value(cursor, depth + 1)?;
                        // Last occurrence of a duplicate key wins.
                        object.insert(pending_key.take().unwrap_or_default(), value);
                        phase = ObjectPhase::AfterPropValue;
                    }
                    _ => {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Unexpected string while processing object",
                            Some(token.input_position),
                        ));
                    }
                },
                TokenType::Null
                | TokenType::True
                | TokenType::False
                | TokenType::Number
                | TokenType::BeginArray
                | TokenType::BeginObject => {
                    if phase != ObjectPhase::AfterColon {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Unexpected element while processing object",
                            Some(token.input_position),
                        ));
                    }
                    let value = self.parse_value(cursor, depth + 1)?;
                    object.insert(pending_key.take().unwrap_or_default(), value);
                    phase = ObjectPhase::AfterPropValue;
                }
                TokenType::Colon => {
                    if phase != ObjectPhase::AfterPropName {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Unexpected colon while processing object",
                            Some(token.input_position),
                        ));
                    }
                    phase = ObjectPhase::AfterColon;
                }
                TokenType::Comma => {
                    if phase != ObjectPhase::AfterPropValue {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedToken,
                            "Unexpected comma while processing object",
                            Some(token.input_position),
                        ));
                    }
                    phase = ObjectPhase::AfterComma;
                }
                _ => {
                    return Err(JsonError::new(
                        ErrorKind::UnexpectedToken,
                        "Unexpected token while processing object",
                        Some(token.input_position),
                    ));
                }
            }
        }
    }

    fn check_depth(&self, depth: usize, pos: InputPosition) -> Result<(), JsonError> {
        if depth >= self.options.max_depth {
            return Err(JsonError::new(
                ErrorKind::DepthExceeded,
                format!("Nesting deeper than the configured maximum of {}", self.options.max_depth),
                Some(pos),
            ));
        }
        Ok(())
    }

    fn next_token_or_fail<I>(
        cursor: &mut TokenCursor<I>,
        start_position: InputPosition,
    ) -> Result<JsonToken, JsonError>
    where
        I: Iterator<Item = Result<JsonToken, JsonError>>,
    {
        if !cursor.move_next()? {
            return Err(JsonError::new(
                ErrorKind::UnexpectedEndOfInput,
                "Unexpected end of input inside container starting",
                Some(start_position),
            ));
        }
        Ok(cursor.current()?.clone())
    }
}

/// Parses one document with default options.
pub fn parse(input_json: &str) -> Result<Value, JsonError> {
    Parser::default().parse(input_json)
}

/// Parses one document with explicit options.
pub fn parse_with(input_json: &str, options: ParseOptions) -> Result<Value, JsonError> {
    Parser::new(options).parse(input_json)
}

/// Classifies and parses a number token. Tokens containing none of `.`, `e`,
/// `E` are the Integer kind; a digit sequence outside 64-bit signed range is
/// an error rather than a silent wrap or promotion to float.
fn parse_number_token(token: &JsonToken) -> Result<Value, JsonError> {
    let text = &token.text;
    if text.contains(['.', 'e', 'E']) {
        let parsed: f64 = text.parse().map_err(|_| {
            JsonError::new(ErrorKind::InvalidNumber, "Malformed float literal", Some(token.input_position))
        })?;
        Ok(Value::Float(parsed))
    } else {
        let parsed: i64 = text.parse().map_err(|_| {
            JsonError::new(
                ErrorKind::InvalidNumber,
                "Integer literal outside 64-bit signed range",
                Some(token.input_position),
            )
        })?;
        Ok(Value::Integer(parsed))
    }
}

/// Decodes a raw string token (quotes and escapes included) into its text.
/// Handles the full escape set plus `\uXXXX`, reassembling surrogate pairs
/// for characters above the basic multilingual plane.
fn decode_string_token(token: &JsonToken) -> Result<String, JsonError> {
    let body: Vec<char> = token.text.chars().collect();
    debug_assert!(body.len() >= 2 && body[0] == '"' && body[body.len() - 1] == '"');

    let inner = &body[1..body.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut i = 0usize;
    while i < inner.len() {
        let ch = inner[i];
        if ch != '\\' {
            out.push(ch);
            i += 1;
            continue;
        }

        i += 1;
        let escape_error = |message: &str| {
            JsonError::new(ErrorKind::InvalidEscape, message, Some(token.input_position))
        };
        let escaped = *inner.get(i).ok_or_else(|| escape_error("Dangling backslash in string"))?;
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = read_hex4(inner, i + 1)
                    .ok_or_else(|| escape_error("Bad unicode escape in string"))?;
                i += 4;
                let code_point = if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: a low surrogate escape must follow.
                    if inner.get(i + 1) != Some(&'\\') || inner.get(i + 2) != Some(&'u') {
                        return Err(escape_error("Unpaired surrogate in string"));
                    }
                    let low = read_hex4(inner, i + 3)
                        .ok_or_else(|| escape_error("Bad unicode escape in string"))?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(escape_error("Unpaired surrogate in string"));
                    }
                    i += 6;
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else if (0xDC00..0xE000).contains(&unit) {
                    return Err(escape_error("Unpaired surrogate in string"));
                } else {
                    unit
                };
                let decoded = char::from_u32(code_point)
                    .ok_or_else(|| escape_error("Escape does not encode a character"))?;
                out.push(decoded);
            }
            _ => return Err(escape_error("Bad escaped character in string")),
        }
        i += 1;
    }
    Ok(out)
}

fn read_hex4(chars: &[char], start: usize) -> Option<u32> {
    let mut result = 0u32;
    for offset in 0..4 {
        let digit = chars.get(start + offset)?.to_digit(16)?;
        result = (result << 4) | digit;
    }
    Some(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommaStatus {
    EmptyCollection,
    ElementSeen,
    CommaSeen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectPhase {
    BeforePropName,
    AfterPropName,
    AfterColon,
    AfterPropValue,
    AfterComma,
}
