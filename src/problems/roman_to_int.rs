use super::{str_arg, ProblemAdapter};
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Fault, Genome, InputSpec, Outcome, Output, Value};
use rand::{Rng, RngCore};

fn symbol_value(c: char) -> std::result::Result<i64, Fault> {
    Ok(match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        other => return Err(Fault::new("KeyError", format!("{:?}", other))),
    })
}

/// Subtractive-notation roman numeral value. Unknown symbols fault.
pub fn roman_to_int(s: &str) -> std::result::Result<i64, Fault> {
    let values = s.chars().map(symbol_value).collect::<std::result::Result<Vec<_>, _>>()?;
    let mut total = 0;
    for (i, &v) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if v < next => total -= v,
            _ => total += v,
        }
    }
    Ok(total)
}

pub fn int_to_roman(mut num: i64) -> String {
    const TABLE: [(i64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, symbol) in TABLE {
        while num >= value {
            out.push_str(symbol);
            num -= value;
        }
    }
    out
}

pub struct RomanToInt {
    spec: InputSpec,
}

impl RomanToInt {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![ArgSpec::string("s", 1, 15)]),
        }
    }
}

impl Default for RomanToInt {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemAdapter for RomanToInt {
    fn id(&self) -> &str {
        "roman_to_int"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        [
            "III", "LVIII", "MCMXCIV", "IV", "CDXLIV", "MMMCMXCIX", "XLII", "XCIX", "IX",
            "MDCLXVI",
        ]
        .iter()
        .map(|s| vec![Value::Str(s.to_string())])
        .collect()
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        Ok(Output::Int(roman_to_int(str_arg(args, 0)?)?))
    }

    /// A standard numeral in `[1, 3999]`; the longest (`MMMDCCCLXXXVIII`) fits the spec
    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let value = rng.gen_range(1..=3999);
        Ok(vec![Value::Str(int_to_roman(value))])
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("ignore_subtractive_rule", |args| {
                let s = str_arg(args, 0)?;
                let mut total = 0;
                for c in s.chars() {
                    total += symbol_value(c)?;
                }
                Ok(Output::Int(total))
            }),
            fn_mutant("accept_lowercase", |args| {
                let s = str_arg(args, 0)?.to_uppercase();
                Ok(Output::Int(roman_to_int(&s)?))
            }),
            fn_mutant("skip_unknown_symbols", |args| {
                let s: String = str_arg(args, 0)?
                    .chars()
                    .filter(|c| symbol_value(*c).is_ok())
                    .collect();
                Ok(Output::Int(roman_to_int(&s)?))
            }),
        ]
    }
}
