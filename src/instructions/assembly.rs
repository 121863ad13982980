/*!
  The human readable textual form of a program is called assembly. One instruction per line,
  written as `Display` writes them:

  ```text
  Add(a, b)       # a += b
  Negate(a)
  Noop
  ```

  Opcode names come from the `strum` derives on `Opcode`. Blank lines are skipped and `#` starts
  a comment that runs to the end of the line.

  A variable whose name is not an ASCII identifier is written in double quotes, with `\`, `"`,
  and the line breaking characters escaped: `Negate("bit-0")`, `Swap("x#1", "a\nb")`.
*/

use std::borrow::Cow;
use std::str::FromStr;

use nom::{
  branch::alt,
  bytes::complete::tag,
  character::complete::{alpha1, alphanumeric1, char as one_char, none_of, space0},
  combinator::{all_consuming, map, opt, recognize, value},
  multi::{fold_many0, many0, separated_list0},
  sequence::{delimited, pair, preceded},
  IResult,
};

use crate::error::{Error, Result};
use crate::instructions::{Instruction, Opcode};
use crate::state::Variable;

/// An opcode name or a variable name.
fn identifier(input: &str) -> IResult<&str, &str> {
  recognize(
    pair(
      alt((alpha1, tag("_"))),
      many0(alt((alphanumeric1, tag("_"))))
    )
  )(input)
}

/// One character of a quoted name, escape sequences resolved.
fn quoted_char(input: &str) -> IResult<&str, char> {
  alt((
    none_of("\\\""),
    preceded(
      one_char('\\'),
      alt((
        value('\\', one_char('\\')),
        value('"',  one_char('"')),
        value('\n', one_char('n')),
        value('\r', one_char('r')),
        value('\t', one_char('t')),
      ))
    )
  ))(input)
}

/// `"..."`, possibly empty.
fn quoted(input: &str) -> IResult<&str, String> {
  delimited(
    one_char('"'),
    fold_many0(quoted_char, String::new, |mut name, c| {
      name.push(c);
      name
    }),
    one_char('"')
  )(input)
}

fn operand(input: &str) -> IResult<&str, Variable> {
  alt((
    map(identifier, Variable::from),
    map(quoted, Variable::from),
  ))(input)
}

/// `( a, "b-1" )`, with any spacing.
fn operand_list(input: &str) -> IResult<&str, Vec<Variable>> {
  delimited(
    pair(one_char('('), space0),
    separated_list0(delimited(space0, one_char(','), space0), operand),
    pair(space0, one_char(')')),
  )(input)
}

/// A whole line with its comment already removed. A missing operand list means no operands.
fn instruction_line(input: &str) -> IResult<&str, (&str, Option<Vec<Variable>>)> {
  all_consuming(
    delimited(
      space0,
      pair(identifier, opt(preceded(space0, operand_list))),
      space0
    )
  )(input)
}

/// Cuts the line at the first `#` that is not inside a quoted name.
fn strip_comment(line: &str) -> &str {
  let mut in_quotes = false;
  let mut escaped   = false;

  for (index, c) in line.char_indices() {
    match (in_quotes, c) {
      _ if escaped    => escaped = false,
      (true,  '\\')   => escaped = true,
      (_,     '"')    => in_quotes = !in_quotes,
      (false, '#')    => return &line[..index],
      _               => {}
    }
  }
  line
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false
  }
}

/// A variable name as it appears in assembly: bare if it is an identifier, quoted otherwise.
pub fn operand_text(name: &str) -> Cow<'_, str> {
  if is_identifier(name) {
    return Cow::Borrowed(name);
  }

  let mut text = String::with_capacity(name.len() + 2);
  text.push('"');
  for c in name.chars() {
    match c {
      '\\' => text.push_str("\\\\"),
      '"'  => text.push_str("\\\""),
      '\n' => text.push_str("\\n"),
      '\r' => text.push_str("\\r"),
      '\t' => text.push_str("\\t"),
      c    => text.push(c)
    }
  }
  text.push('"');
  Cow::Owned(text)
}

/// Parses one line. `Ok(None)` for a line with nothing but whitespace or a comment.
fn parse_line(text: &str, line: u32) -> Result<Option<Instruction>> {
  let code = strip_comment(text);
  if code.trim().is_empty() {
    return Ok(None);
  }

  let (_rest, (name, operands)) =
    instruction_line(code).map_err(|_| Error::Assembly {
      line,
      message: format!("cannot parse `{}`", code.trim())
    })?;

  let opcode = Opcode::from_str(name).map_err(|_| Error::Assembly {
    line,
    message: format!("{} is not an operation", name)
  })?;

  let operands: Vec<Variable> = operands.unwrap_or_default();
  let given = operands.len();

  match Instruction::from_parts(opcode, operands) {
    Some(instruction) => Ok(Some(instruction)),
    None => Err(Error::Assembly {
      line,
      message: format!("{} requires {} arguments but was given {}", opcode, opcode.arity(), given)
    })
  }
}

/// Parses a program, reporting the first bad line by its 1-based number.
pub fn parse_assembly(text: &str) -> Result<Vec<Instruction>> {
  let mut program = Vec::new();
  for (index, line) in text.lines().enumerate() {
    if let Some(instruction) = parse_line(line, index as u32 + 1)? {
      program.push(instruction);
    }
  }
  Ok(program)
}

/// Writes a program in the form `parse_assembly` reads.
pub fn to_assembly(program: &[Instruction]) -> String {
  program.iter()
         .map(|instruction| format!("{}\n", instruction))
         .collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_a_commented_program() {
    let text = "
Add(a, b)   # a += b
      Sub (  a,b   )
 Negate(x)

  # nothing here
Swap(x, y)
Noop
Noop()
";
    let program = parse_assembly(text).unwrap();
    assert_eq!(
      program,
      vec![
        Instruction::add("a", "b"),
        Instruction::sub("a", "b"),
        Instruction::negate("x"),
        Instruction::swap("x", "y"),
        Instruction::Noop,
        Instruction::Noop,
      ]
    );
  }

  #[test]
  fn unknown_opcode_reports_its_line() {
    let error = parse_assembly("Noop\nMultiply(a, b)\n").unwrap_err();
    match error {
      Error::Assembly { line, message } => {
        assert_eq!(line, 2);
        assert!(message.contains("Multiply"));
      }
      other => panic!("unexpected error: {}", other)
    }
  }

  #[test]
  fn wrong_arity_reports_its_line() {
    let error = parse_assembly("Negate(a, b)").unwrap_err();
    assert!(matches!(error, Error::Assembly { line: 1, .. }));
    assert!(parse_assembly("Add(a)").is_err());
    assert!(parse_assembly("Swap").is_err());
  }

  #[test]
  fn malformed_line_is_rejected() {
    assert!(matches!(parse_assembly("Add(a, b"), Err(Error::Assembly { line: 1, .. })));
    assert!(matches!(parse_assembly("Add(a, b) c"), Err(Error::Assembly { line: 1, .. })));
  }

  #[test]
  fn display_output_parses_back() {
    let program = vec![
      Instruction::add("reg_1", "reg_2"),
      Instruction::negate("reg_1"),
      Instruction::Noop,
    ];
    assert_eq!(parse_assembly(&to_assembly(&program)).unwrap(), program);
  }

  #[test]
  fn awkward_names_are_quoted() {
    assert_eq!(operand_text("reg_1"), "reg_1");
    assert_eq!(operand_text("bit-0"), "\"bit-0\"");
    assert_eq!(operand_text("1st"), "\"1st\"");
    assert_eq!(operand_text(""), "\"\"");
    assert_eq!(operand_text("say \"hi\"\n"), r#""say \"hi\"\n""#);
  }

  #[test]
  fn quoted_names_parse_back() {
    let program = vec![
      Instruction::negate("bit-0"),
      Instruction::swap("x#1", "a b"),
      Instruction::add("", "back\\slash"),
      Instruction::sub("line\nbreak", "tab\there"),
      Instruction::negate("Noop"),
    ];
    let text = to_assembly(&program);
    assert_eq!(text.lines().count(), program.len());
    assert_eq!(parse_assembly(&text).unwrap(), program);
  }

  #[test]
  fn hash_inside_quotes_is_not_a_comment() {
    let program = parse_assembly("Swap(\"x#1\", y)  # trailing # comment").unwrap();
    assert_eq!(program, vec![Instruction::swap("x#1", "y")]);
    assert!(matches!(parse_assembly("Negate(\"open)"), Err(Error::Assembly { line: 1, .. })));
  }
}
