//! Documentation content for vfilter CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Translation,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "translation" | "translate" | "backend" => Some(Self::Translation),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"VFILTER DOCUMENTATION

vfilter checks filter expressions for vector-store queries and translates them
into a boolean clause filter with must, should and must_not groups.

DOCUMENTATION CATEGORIES

  syntax            Fields, literals, lists, indexing and parentheses
  operators         Comparison, membership, pattern and logical operators
  translation       How filters map onto must, should and must_not

QUICK REFERENCE

  age > 18                  Range condition
  status == 'active'        Exact match
  id in (1, 2, 3)           Set membership
  name like 'John%'         Text match
  user["profile"]["name"]   Nested field, key user.profile.name
  not (a == 1)              Negation

Run 'vfilter doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Translation) => Ok(TRANSLATION_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Fields, Literals and Grouping

FIELDS

  Identifiers name payload fields. They contain letters, digits and
  underscores.

    status
    user_type

INDEXING

  Nested fields are reached with [key]. String keys and numeric keys are
  joined into a dotted field key.

    user["profile"]["name"]     key: user.profile.name
    tags[0]                     key: tags.0
    grid[1.50]                  key: grid.1.5

  Boolean keys are rejected.

LITERALS

  'text' or "text"            Strings, no escape sequences
  42, -3.5, 1e3               Numbers, stored in normalized form
  true, false                 Booleans

LISTS

  Lists appear only on the right of 'in'. Elements are literals of one kind.

    ('a', 'b', 'c')
    (1, 2, 3)

  An empty list or a list mixing kinds is rejected.

GROUPING

  Parentheses group sub-expressions. They must enclose an expression, not a
  bare field or literal.

    age > 18 and (status == 'active' or verified == true)

KEYWORDS

  and, or, not, in, like, true and false are case-insensitive.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison, Membership and Logic

PRECEDENCE (loosest first)

  or
  and
  not
  ==  !=
  <  <=  >  >=
  in  like

COMPARISON

  field == literal            Exact match on a string, number or boolean
  field != literal            Negated exact match
  field <  number             Range bounds; the right side must be a number
  field <= number
  field >  number
  field >= number

MEMBERSHIP AND PATTERNS

  field in (v1, v2, ...)      Matches any listed value
  field like 'pattern'        Full-text match, the pattern is passed through

LOGIC

  a and b                     Both hold
  a or b                      At least one holds
  not a                       Does not hold; the operand must be an expression

  The left side of every comparison is a field. Operands of and, or and not
  are comparisons or other logical expressions.
"#;

const TRANSLATION_DOC: &str = r#"TRANSLATION - Backend Filter Shape

GROUPS

  must          Every condition holds
  should        At least one condition holds
  must_not      No condition holds

MAPPING

  a == v        must      {"key": "a", "match": {"value": v}}
  a != v        must_not  {"key": "a", "match": {"value": v}}
  a > n         must      {"key": "a", "range": {"gt": n}}
  a in (...)    must      {"key": "a", "match": {"any": [...]}}
  a like 'p'    must      {"key": "a", "match": {"text": "p"}}
  not x         must_not  the condition for x

  Numbers compared with == != and in are truncated to integers. Range bounds
  keep their fractional part. A boolean 'in' becomes a nested filter with one
  should condition per value.

NESTING

  Chains of 'and' spread across must and chains of 'or' across should. Where
  the operator changes, the sub-expression becomes a nested filter.

    age > 18 and (status == 'active' or status == 'pending')

    {"must": [{"key": "age", "range": {"gt": 18.0}},
              {"should": [{"key": "status", "match": {"value": "active"}},
                          {"key": "status", "match": {"value": "pending"}}]}]}

  Run 'vfilter convert' to see the translation of a filter.
"#;
