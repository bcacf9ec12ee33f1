//! Typed literal and linked-object accessors layered over any [`QuadStore`].
//!
//! Writers encode a Rust value as a literal tagged with a fixed XSD datatype. Readers
//! match `(subject, predicate, *, graph)` and decode every object; an object of the
//! wrong kind or datatype is an error rather than being skipped, so a typed view is
//! never silently partial. `..._all` readers return `Ok(None)` when nothing matches,
//! which keeps "no value" distinct from an empty result.

use crate::consts::{XSD_BOOLEAN, XSD_DATE, XSD_DECIMAL, XSD_INTEGER, XSD_STRING};
use crate::errors::{Result, SemantizerError};
use crate::store::{QuadPattern, QuadStore};
use chrono::{Datelike, NaiveDate};
use oxigraph::model::{
    GraphName, GraphNameRef, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Quad, Term,
};

/// A Rust value with a literal encoding under one XSD datatype.
pub trait XsdValue: Sized {
    fn datatype() -> NamedNodeRef<'static>;

    fn to_lexical(&self) -> Result<String>;

    fn from_lexical(value: &str) -> Result<Self>;

    fn to_literal(&self) -> Result<Literal> {
        Ok(Literal::new_typed_literal(self.to_lexical()?, Self::datatype()))
    }
}

fn invalid<T>(datatype: NamedNodeRef<'_>, value: &str) -> Result<T> {
    Err(SemantizerError::InvalidLiteral {
        datatype: datatype.as_str().to_string(),
        value: value.to_string(),
    })
}

impl XsdValue for f64 {
    fn datatype() -> NamedNodeRef<'static> {
        XSD_DECIMAL
    }

    fn to_lexical(&self) -> Result<String> {
        if !self.is_finite() {
            return invalid(XSD_DECIMAL, &self.to_string());
        }
        // Display for f64 never uses exponent notation, which xsd:decimal forbids
        Ok(self.to_string())
    }

    fn from_lexical(value: &str) -> Result<Self> {
        // f64 parsing accepts exponents, which xsd:decimal does not
        if value.contains(['e', 'E']) {
            return invalid(XSD_DECIMAL, value);
        }
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => invalid(XSD_DECIMAL, value),
        }
    }
}

impl XsdValue for i64 {
    fn datatype() -> NamedNodeRef<'static> {
        XSD_INTEGER
    }

    fn to_lexical(&self) -> Result<String> {
        Ok(self.to_string())
    }

    fn from_lexical(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<i64>()
            .or_else(|_| invalid(XSD_INTEGER, value))
    }
}

impl XsdValue for bool {
    fn datatype() -> NamedNodeRef<'static> {
        XSD_BOOLEAN
    }

    fn to_lexical(&self) -> Result<String> {
        Ok(self.to_string())
    }

    fn from_lexical(value: &str) -> Result<Self> {
        match value.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => invalid(XSD_BOOLEAN, value),
        }
    }
}

/// Splits an optional trailing timezone (`Z` or `±hh:mm`) off an `xsd:date` lexical form.
fn split_zone(value: &str) -> Option<(&str, &str)> {
    if let Some(date) = value.strip_suffix('Z') {
        return Some((date, "Z"));
    }
    let bytes = value.as_bytes();
    if bytes.len() > 6 {
        let zone = &bytes[bytes.len() - 6..];
        if matches!(zone[0], b'+' | b'-') && zone[3] == b':' {
            let digits = [zone[1], zone[2], zone[4], zone[5]];
            if !digits.iter().all(u8::is_ascii_digit) {
                return None;
            }
            let hours = (zone[1] - b'0') * 10 + (zone[2] - b'0');
            let minutes = (zone[4] - b'0') * 10 + (zone[5] - b'0');
            if hours > 14 || minutes > 59 || (hours == 14 && minutes != 0) {
                return None;
            }
            let split = value.len() - 6;
            return Some((&value[..split], &value[split..]));
        }
    }
    Some((value, ""))
}

/// Parses `-?YYYY+-MM-DD`; years past four digits must not start with `0`.
fn parse_date(date: &str) -> Option<NaiveDate> {
    let (negative, rest) = match date.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, date),
    };
    let mut parts = rest.splitn(3, '-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return None;
    }
    if year.len() < 4 || (year.len() > 4 && year.starts_with('0')) {
        return None;
    }
    if month.len() != 2 || day.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let year = if negative { -year } else { year };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

impl XsdValue for NaiveDate {
    fn datatype() -> NamedNodeRef<'static> {
        XSD_DATE
    }

    fn to_lexical(&self) -> Result<String> {
        let year = self.year();
        let sign = if year < 0 { "-" } else { "" };
        Ok(format!(
            "{sign}{:04}-{:02}-{:02}",
            year.unsigned_abs(),
            self.month(),
            self.day()
        ))
    }

    fn from_lexical(value: &str) -> Result<Self> {
        let value = value.trim();
        // the timezone is validated, then dropped: NaiveDate has none
        split_zone(value)
            .and_then(|(date, _zone)| parse_date(date))
            .map_or_else(|| invalid(XSD_DATE, value), Ok)
    }
}

impl XsdValue for String {
    fn datatype() -> NamedNodeRef<'static> {
        XSD_STRING
    }

    fn to_lexical(&self) -> Result<String> {
        Ok(self.clone())
    }

    fn from_lexical(value: &str) -> Result<Self> {
        Ok(value.to_string())
    }

    fn to_literal(&self) -> Result<Literal> {
        Ok(Literal::new_simple_literal(self.as_str()))
    }
}

fn graph_or_default(graph: Option<GraphNameRef<'_>>) -> GraphName {
    graph.map(GraphName::from).unwrap_or(GraphName::DefaultGraph)
}

fn pattern<'a>(
    subject: impl Into<NamedOrBlankNodeRef<'a>>,
    predicate: NamedNodeRef<'_>,
    graph: Option<GraphNameRef<'_>>,
) -> QuadPattern {
    QuadPattern::new()
        .subject(NamedOrBlankNode::from(subject.into()))
        .predicate(predicate)
        .maybe_graph(graph.map(GraphName::from))
}

/// Typed add/get operations against a `subject, predicate (, graph)` coordinate.
///
/// Writers insert into `graph`, or the default graph when `graph` is `None`. Readers
/// restrict to `graph` when given and search every graph otherwise. Single-value
/// readers return the first match in store iteration order.
pub trait TypedAccessors: QuadStore {
    fn add_object<'a, T: XsdValue>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: &T,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        let literal = value.to_literal()?;
        self.insert(Quad::new(
            NamedOrBlankNode::from(subject.into()),
            predicate,
            literal,
            graph_or_default(graph),
        ));
        Ok(())
    }

    fn get_object_all<'a, T: XsdValue>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<T>>> {
        let datatype = T::datatype();
        let mut results = None;
        for quad in self.quads_matching(&pattern(subject, predicate, graph)) {
            let values = results.get_or_insert_with(Vec::new);
            match &quad.object {
                Term::Literal(literal) if literal.datatype() == datatype => {
                    values.push(T::from_lexical(literal.value())?);
                }
                other => return Err(SemantizerError::invalid_term(datatype.as_str(), other)),
            }
        }
        Ok(results)
    }

    fn get_object<'a, T: XsdValue>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<T>> {
        Ok(self
            .get_object_all(subject, predicate, graph)?
            .and_then(|values| values.into_iter().next()))
    }

    fn add_object_decimal<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: f64,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        self.add_object(subject, predicate, &value, graph)
    }

    fn get_object_decimal_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<f64>>> {
        self.get_object_all(subject, predicate, graph)
    }

    fn get_object_decimal<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<f64>> {
        self.get_object(subject, predicate, graph)
    }

    fn add_object_integer<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: i64,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        self.add_object(subject, predicate, &value, graph)
    }

    fn get_object_integer_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<i64>>> {
        self.get_object_all(subject, predicate, graph)
    }

    fn get_object_integer<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<i64>> {
        self.get_object(subject, predicate, graph)
    }

    fn add_object_boolean<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: bool,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        self.add_object(subject, predicate, &value, graph)
    }

    fn get_object_boolean_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<bool>>> {
        self.get_object_all(subject, predicate, graph)
    }

    fn get_object_boolean<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<bool>> {
        self.get_object(subject, predicate, graph)
    }

    fn add_object_date<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: NaiveDate,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        self.add_object(subject, predicate, &value, graph)
    }

    fn get_object_date_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<NaiveDate>>> {
        self.get_object_all(subject, predicate, graph)
    }

    fn get_object_date<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<NaiveDate>> {
        self.get_object(subject, predicate, graph)
    }

    fn add_object_string_no_locale<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: &str,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        self.add_object(subject, predicate, &value.to_string(), graph)
    }

    fn get_object_string_no_locale_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<String>>> {
        self.get_object_all(subject, predicate, graph)
    }

    fn get_object_string_no_locale<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<String>> {
        self.get_object(subject, predicate, graph)
    }

    // language-tagged strings, times and datetimes have no agreed encoding yet

    fn add_object_string_english<'a>(
        &mut self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _value: &str,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        Err(SemantizerError::NotImplemented("add_object_string_english"))
    }

    fn get_object_string_english_all<'a>(
        &self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<String>>> {
        Err(SemantizerError::NotImplemented("get_object_string_english_all"))
    }

    fn add_object_string_with_locale<'a>(
        &mut self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _value: &str,
        _locale: &str,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        Err(SemantizerError::NotImplemented("add_object_string_with_locale"))
    }

    fn get_object_string_with_locale_all<'a>(
        &self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _locale: &str,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<String>>> {
        Err(SemantizerError::NotImplemented(
            "get_object_string_with_locale_all",
        ))
    }

    fn add_object_time<'a>(
        &mut self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _value: chrono::NaiveTime,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        Err(SemantizerError::NotImplemented("add_object_time"))
    }

    fn get_object_time_all<'a>(
        &self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<chrono::NaiveTime>>> {
        Err(SemantizerError::NotImplemented("get_object_time_all"))
    }

    fn add_object_datetime<'a>(
        &mut self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _value: chrono::NaiveDateTime,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<()> {
        Err(SemantizerError::NotImplemented("add_object_datetime"))
    }

    fn get_object_datetime_all<'a>(
        &self,
        _subject: impl Into<NamedOrBlankNodeRef<'a>>,
        _predicate: NamedNodeRef<'_>,
        _graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<chrono::NaiveDateTime>>> {
        Err(SemantizerError::NotImplemented("get_object_datetime_all"))
    }

    /// Links `subject` to another node with `predicate`.
    fn add_linked_object<'a, 'b>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        object: impl Into<NamedOrBlankNodeRef<'b>>,
        graph: Option<GraphNameRef<'_>>,
    ) {
        self.insert(Quad::new(
            NamedOrBlankNode::from(subject.into()),
            predicate,
            NamedOrBlankNode::from(object.into()),
            graph_or_default(graph),
        ));
    }

    fn add_object_uri<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        value: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) {
        self.add_linked_object(subject, predicate, value, graph)
    }

    /// Objects that are blank or named nodes; a literal object is an error.
    fn get_object_linked_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<NamedOrBlankNode>>> {
        let mut results = None;
        for quad in self.quads_matching(&pattern(subject, predicate, graph)) {
            let values = results.get_or_insert_with(Vec::new);
            match &quad.object {
                Term::NamedNode(node) => values.push(node.clone().into()),
                Term::BlankNode(node) => values.push(node.clone().into()),
                other => {
                    return Err(SemantizerError::invalid_term("named or blank node", other))
                }
            }
        }
        Ok(results)
    }

    fn get_object_linked<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<NamedOrBlankNode>> {
        Ok(self
            .get_object_linked_all(subject, predicate, graph)?
            .and_then(|values| values.into_iter().next()))
    }

    /// Objects that are named nodes; any other object is an error.
    fn get_object_uri_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<Vec<NamedNode>>> {
        let mut results = None;
        for quad in self.quads_matching(&pattern(subject, predicate, graph)) {
            let values = results.get_or_insert_with(Vec::new);
            match &quad.object {
                Term::NamedNode(node) => values.push(node.clone()),
                other => return Err(SemantizerError::invalid_term("named node", other)),
            }
        }
        Ok(results)
    }

    fn get_object_uri<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Option<NamedNode>> {
        Ok(self
            .get_object_uri_all(subject, predicate, graph)?
            .and_then(|values| values.into_iter().next()))
    }

    /// Literal objects of any datatype, skipping node objects.
    fn get_literal_all<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Vec<Literal> {
        self.quads_matching(&pattern(subject, predicate, graph))
            .filter_map(|quad| match &quad.object {
                Term::Literal(literal) => Some(literal.clone()),
                _ => None,
            })
            .collect()
    }

    fn get_literal<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: NamedNodeRef<'_>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Option<Literal> {
        self.get_literal_all(subject, predicate, graph)
            .into_iter()
            .next()
    }
}

impl<S: QuadStore + ?Sized> TypedAccessors for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use oxigraph::model::BlankNode;

    const S: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/s");
    const P: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/p");
    const G: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/g");

    #[test]
    fn test_decimal_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_object_decimal_all(S, P, None).unwrap(), None);
        store.add_object_decimal(S, P, 12.5, None).unwrap();
        assert_eq!(
            store.get_object_decimal_all(S, P, None).unwrap(),
            Some(vec![12.5])
        );
        let quad = store.iter().next().unwrap();
        match &quad.object {
            Term::Literal(l) => {
                assert_eq!(l.value(), "12.5");
                assert_eq!(l.datatype(), XSD_DECIMAL);
            }
            other => panic!("unexpected object {other}"),
        }
    }

    #[test]
    fn test_non_finite_decimal_is_rejected() {
        let mut store = MemoryStore::new();
        let err = store.add_object_decimal(S, P, f64::NAN, None).unwrap_err();
        assert!(matches!(err, SemantizerError::InvalidLiteral { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_integer_boolean_date_string() {
        let mut store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        store.add_object_integer(S, P, -42, Some(G.into())).unwrap();
        store
            .add_object_boolean(S, NamedNodeRef::new_unchecked("http://example.org/b"), false, None)
            .unwrap();
        store
            .add_object_date(S, NamedNodeRef::new_unchecked("http://example.org/d"), date, None)
            .unwrap();
        store
            .add_object_string_no_locale(
                S,
                NamedNodeRef::new_unchecked("http://example.org/n"),
                "hello",
                None,
            )
            .unwrap();

        assert_eq!(store.get_object_integer(S, P, None).unwrap(), Some(-42));
        assert_eq!(
            store.get_object_integer(S, P, Some(G.into())).unwrap(),
            Some(-42)
        );
        assert_eq!(
            store
                .get_object_integer(S, P, Some(GraphNameRef::DefaultGraph))
                .unwrap(),
            None
        );
        // false is a value, not an absence
        assert_eq!(
            store
                .get_object_boolean(S, NamedNodeRef::new_unchecked("http://example.org/b"), None)
                .unwrap(),
            Some(false)
        );
        assert_eq!(
            store
                .get_object_date(S, NamedNodeRef::new_unchecked("http://example.org/d"), None)
                .unwrap(),
            Some(date)
        );
        assert_eq!(
            store
                .get_object_string_no_locale(
                    S,
                    NamedNodeRef::new_unchecked("http://example.org/n"),
                    None
                )
                .unwrap(),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_date_with_timezone() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        assert_eq!(NaiveDate::from_lexical("2023-05-01Z").unwrap(), expected);
        assert_eq!(NaiveDate::from_lexical("2023-05-01+02:00").unwrap(), expected);
        assert_eq!(NaiveDate::from_lexical("2023-05-01-05:00").unwrap(), expected);
        assert!(NaiveDate::from_lexical("2023-05-01garbage").is_err());
        assert!(NaiveDate::from_lexical("2023-05-01+ab:cd").is_err());
        assert!(NaiveDate::from_lexical("2023-05-01+15:00").is_err());
        assert!(NaiveDate::from_lexical("01/05/2023").is_err());
    }

    #[test]
    fn test_date_years_outside_four_digits() {
        let d = NamedNodeRef::new_unchecked("http://example.org/d");
        for year in [-1, 1, 9999, 10000] {
            let date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
            let mut store = MemoryStore::new();
            store.add_object_date(S, d, date, None).unwrap();
            assert_eq!(store.get_object_date_all(S, d, None).unwrap(), Some(vec![date]));
        }
        let lexical = |year| {
            NaiveDate::from_ymd_opt(year, 1, 1)
                .unwrap()
                .to_lexical()
                .unwrap()
        };
        assert_eq!(lexical(-1), "-0001-01-01");
        assert_eq!(lexical(1), "0001-01-01");
        assert_eq!(lexical(10000), "10000-01-01");
        assert_eq!(
            NaiveDate::from_lexical("-0001-01-01Z").unwrap(),
            NaiveDate::from_ymd_opt(-1, 1, 1).unwrap()
        );
        assert_eq!(
            NaiveDate::from_lexical("10000-01-01+01:00").unwrap(),
            NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()
        );
        assert!(NaiveDate::from_lexical("+10000-01-01").is_err());
        assert!(NaiveDate::from_lexical("010000-01-01").is_err());
        assert!(NaiveDate::from_lexical("999-01-01").is_err());
    }

    #[test]
    fn test_decimal_rejects_exponents() {
        assert!(f64::from_lexical("1e5").is_err());
        assert!(f64::from_lexical("2.5E-3").is_err());
        assert_eq!(f64::from_lexical("100000").unwrap(), 100000.0);
    }

    #[test]
    fn test_boolean_lexical_forms() {
        assert!(bool::from_lexical("1").unwrap());
        assert!(!bool::from_lexical("0").unwrap());
        assert!(bool::from_lexical("yes").is_err());
    }

    #[test]
    fn test_decimal_on_named_node_is_invalid_term_type() {
        let mut store = MemoryStore::new();
        store.add_object_uri(S, P, NamedNodeRef::new_unchecked("http://example.org/o"), None);
        let err = store.get_object_decimal_all(S, P, None).unwrap_err();
        assert!(matches!(err, SemantizerError::InvalidTermType { .. }));
    }

    #[test]
    fn test_mixed_datatypes_fail() {
        let mut store = MemoryStore::new();
        store.add_object_decimal(S, P, 1.0, None).unwrap();
        store.add_object_integer(S, P, 1, None).unwrap();
        assert!(store.get_object_decimal_all(S, P, None).is_err());
        assert!(store.get_object_integer(S, P, None).is_err());
    }

    #[test]
    fn test_first_value_is_first_inserted() {
        let mut store = MemoryStore::new();
        store.add_object_integer(S, P, 3, None).unwrap();
        store.add_object_integer(S, P, 1, None).unwrap();
        store.add_object_integer(S, P, 2, None).unwrap();
        assert_eq!(store.get_object_integer(S, P, None).unwrap(), Some(3));
        assert_eq!(
            store.get_object_integer_all(S, P, None).unwrap(),
            Some(vec![3, 1, 2])
        );
    }

    #[test]
    fn test_linked_objects() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_object_linked(S, P, None).unwrap(), None);
        assert_eq!(store.get_object_uri(S, P, None).unwrap(), None);

        let bnode = BlankNode::default();
        store.add_object_uri(S, P, NamedNodeRef::new_unchecked("http://example.org/o"), None);
        store.add_linked_object(S, P, bnode.as_ref(), None);
        let linked = store.get_object_linked_all(S, P, None).unwrap().unwrap();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[1], NamedOrBlankNode::from(bnode));
        // a blank node is not a uri
        assert!(store.get_object_uri_all(S, P, None).is_err());

        store.add_object_string_no_locale(S, P, "x", None).unwrap();
        let err = store.get_object_linked_all(S, P, None).unwrap_err();
        assert!(matches!(err, SemantizerError::InvalidTermType { .. }));
    }

    #[test]
    fn test_literals_of_any_datatype() {
        let mut store = MemoryStore::new();
        store.add_object_uri(S, P, NamedNodeRef::new_unchecked("http://example.org/o"), None);
        store.add_object_integer(S, P, 7, None).unwrap();
        store.add_object_string_no_locale(S, P, "seven", None).unwrap();
        let literals = store.get_literal_all(S, P, None);
        assert_eq!(literals.len(), 2);
        assert_eq!(store.get_literal(S, P, None).unwrap().value(), "7");
    }

    #[test]
    fn test_unsupported_families() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.add_object_string_with_locale(S, P, "bonjour", "fr", None),
            Err(SemantizerError::NotImplemented(_))
        ));
        assert!(matches!(
            store.add_object_string_english(S, P, "hello", None),
            Err(SemantizerError::NotImplemented(_))
        ));
        assert!(matches!(
            store.get_object_time_all(S, P, None),
            Err(SemantizerError::NotImplemented(_))
        ));
        assert!(matches!(
            store.get_object_datetime_all(S, P, None),
            Err(SemantizerError::NotImplemented(_))
        ));
        assert!(store.is_empty());
    }
}
