use crate::http::request::Method;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequestLine,
    InvalidVersion,
    InvalidTarget,
    InvalidHeader,
    InvalidContentLength,
}

/// Parses `METHOD target HTTP/x.y` into its three parts.
pub fn parse_request_line(line: &str) -> Result<(Method, String, (u8, u8)), ParseError> {
    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let target = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let version = parts.next().ok_or(ParseError::InvalidRequestLine)?;

    if parts.next().is_some() {
        return Err(ParseError::InvalidRequestLine);
    }

    Ok((
        Method::from_token(method),
        target.to_string(),
        parse_version(version)?,
    ))
}

/// Parses `HTTP/1.1` into `(1, 1)`.
pub fn parse_version(token: &str) -> Result<(u8, u8), ParseError> {
    let rest = token.strip_prefix("HTTP/").ok_or(ParseError::InvalidVersion)?;
    let (major, minor) = rest.split_once('.').ok_or(ParseError::InvalidVersion)?;

    let major = major.parse().map_err(|_| ParseError::InvalidVersion)?;
    let minor = minor.parse().map_err(|_| ParseError::InvalidVersion)?;
    Ok((major, minor))
}

/// Parses a `Name: value` header line. Surrounding whitespace is trimmed,
/// the casing is kept as received.
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let (name, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::InvalidHeader);
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Parses a declared `Content-Length` value. Negative values parse; the
/// caller treats anything non-positive as "no body".
pub fn parse_content_length(value: &str) -> Result<i64, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidContentLength)
}

/// Splits a request target into `(path, query)`.
///
/// - a literal `*` stays `("*", "")`
/// - an absolute URI is reduced to its path-plus-query portion, the
///   scheme and host are discarded
/// - an absolute path is split on the FIRST `?` only
///
/// Every other shape is a protocol error.
pub fn split_target(target: &str) -> Result<(String, String), ParseError> {
    if target == "*" {
        return Ok(("*".to_string(), String::new()));
    }

    if target.starts_with('/') {
        return Ok(match target.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (target.to_string(), String::new()),
        });
    }

    if target.contains("://") {
        let url = url::Url::parse(target).map_err(|_| ParseError::InvalidTarget)?;
        let mut rest = url.path().to_string();
        if let Some(query) = url.query() {
            rest.push('?');
            rest.push_str(query);
        }
        return split_target(&rest);
    }

    Err(ParseError::InvalidTarget)
}
