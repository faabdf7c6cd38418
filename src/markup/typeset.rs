//! Math typesetting for the terminal.
//!
//! [`UnicodeTypesetter`] lays out a practical subset of LaTeX math as plain
//! Unicode text. Like a full math layout engine it rejects malformed input
//! (unbalanced braces, unknown commands) instead of guessing.

use std::{error::Error as StdError, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    UnbalancedBraces,
    UndefinedControlSequence(String),
    TrailingBackslash,
    MissingArgument(String),
    TooDeep,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedBraces => write!(f, "unbalanced braces"),
            Self::UndefinedControlSequence(name) => {
                write!(f, "undefined control sequence: \\{name}")
            }
            Self::TrailingBackslash => write!(f, "expression ends with a backslash"),
            Self::MissingArgument(what) => write!(f, "missing argument for {what}"),
            Self::TooDeep => write!(f, "expression nested too deeply"),
        }
    }
}

impl StdError for MathError {}

/// Turns a math expression into displayable text.
pub trait Typesetter {
    fn typeset(&self, expr: &str, mode: MathMode) -> Result<String, MathError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTypesetter;

impl Typesetter for UnicodeTypesetter {
    fn typeset(&self, expr: &str, mode: MathMode) -> Result<String, MathError> {
        let mut parser = Parser {
            chars: expr.chars().collect(),
            pos: 0,
            mode,
            depth: 0,
        };
        let raw = parser.sequence(false)?;
        Ok(collapse_whitespace(&raw, mode))
    }
}

const SYMBOLS: &[(&str, &str)] = &[
    // Greek
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("varphi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
    // Operators
    ("cdot", "·"),
    ("times", "×"),
    ("div", "÷"),
    ("pm", "±"),
    ("mp", "∓"),
    ("circ", "∘"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("oint", "∮"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("setminus", "∖"),
    ("wedge", "∧"),
    ("vee", "∨"),
    ("neg", "¬"),
    ("lnot", "¬"),
    ("oplus", "⊕"),
    ("otimes", "⊗"),
    // Relations
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("sim", "∼"),
    ("cong", "≅"),
    ("propto", "∝"),
    ("in", "∈"),
    ("notin", "∉"),
    ("ni", "∋"),
    ("subset", "⊂"),
    ("subseteq", "⊆"),
    ("supset", "⊃"),
    ("supseteq", "⊇"),
    ("mid", "∣"),
    ("nmid", "∤"),
    ("perp", "⊥"),
    // Arrows
    ("to", "→"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("leftrightarrow", "↔"),
    ("Rightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("Leftrightarrow", "⇔"),
    ("implies", "⟹"),
    ("iff", "⟺"),
    ("mapsto", "↦"),
    // Logic and sets
    ("forall", "∀"),
    ("exists", "∃"),
    ("emptyset", "∅"),
    ("varnothing", "∅"),
    ("infty", "∞"),
    ("aleph", "ℵ"),
    // Dots and delimiters
    ("dots", "…"),
    ("ldots", "…"),
    ("cdots", "⋯"),
    ("vdots", "⋮"),
    ("ddots", "⋱"),
    ("langle", "⟨"),
    ("rangle", "⟩"),
    ("lfloor", "⌊"),
    ("rfloor", "⌋"),
    ("lceil", "⌈"),
    ("rceil", "⌉"),
    ("vert", "|"),
    ("Vert", "‖"),
    // Misc
    ("blacksquare", "∎"),
    ("square", "□"),
    ("qed", "∎"),
    ("therefore", "∴"),
    ("because", "∵"),
    ("prime", "′"),
    ("ell", "ℓ"),
    ("hbar", "ℏ"),
    ("Re", "ℜ"),
    ("Im", "ℑ"),
    // Spacing
    ("quad", "  "),
    ("qquad", "    "),
];

const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "log", "ln", "exp", "lim", "max", "min", "sup", "inf", "det", "gcd", "deg", "dim",
    "ker", "mod", "arg",
];

/// Commands whose argument is shown as-is.
const TEXT_COMMANDS: &[&str] = &[
    "text", "mathrm", "mathit", "mathbf", "textbf", "textit", "operatorname", "mathsf", "boldsymbol",
];

/// Commands with no visual effect in terminal layout.
const IGNORED: &[&str] = &["left", "right", "displaystyle", "textstyle", "limits", "big", "Big", "bigg", "Bigg"];

/// Deepest allowed nesting of groups and command arguments.
const MAX_DEPTH: usize = 128;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    mode: MathMode,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Run `parse` one nesting level down.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, MathError>,
    ) -> Result<T, MathError> {
        if self.depth >= MAX_DEPTH {
            return Err(MathError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse until end of input, or until the closing brace of a group.
    fn sequence(&mut self, in_group: bool) -> Result<String, MathError> {
        let mut out = String::new();
        while let Some(c) = self.next() {
            match c {
                '{' => out.push_str(&self.nested(|p| p.sequence(true))?),
                '}' if in_group => return Ok(out),
                '}' => return Err(MathError::UnbalancedBraces),
                '\\' => {
                    let rendered = self.command()?;
                    push_spaced(&mut out, &rendered);
                }
                '^' | '_' => {
                    let arg = self.argument(&c.to_string())?;
                    out.push_str(&script(&arg, c == '^'));
                }
                '\'' => out.push('′'),
                c => out.push(c),
            }
        }
        if in_group {
            Err(MathError::UnbalancedBraces)
        } else {
            Ok(out)
        }
    }

    /// A single atom: a brace group, a command, or one character.
    fn argument(&mut self, owner: &str) -> Result<String, MathError> {
        self.nested(|p| p.atom(owner))
    }

    fn atom(&mut self, owner: &str) -> Result<String, MathError> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        match self.next() {
            None | Some('}') => Err(MathError::MissingArgument(owner.to_string())),
            Some('{') => self.sequence(true),
            Some('\\') => self.command(),
            Some(c) => Ok(c.to_string()),
        }
    }

    fn command(&mut self) -> Result<String, MathError> {
        let Some(first) = self.next() else {
            return Err(MathError::TrailingBackslash);
        };
        if !first.is_ascii_alphabetic() {
            return Ok(match first {
                ',' | ':' | ';' | ' ' => " ".to_string(),
                '!' => String::new(),
                '\\' if self.mode == MathMode::Block => "\n".to_string(),
                '\\' => " ".to_string(),
                c => c.to_string(),
            });
        }

        let mut name = String::from(first);
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }
        self.control_word(&name)
    }

    fn control_word(&mut self, name: &str) -> Result<String, MathError> {
        if let Some((_, symbol)) = SYMBOLS.iter().find(|(n, _)| *n == name) {
            return Ok((*symbol).to_string());
        }
        if FUNCTIONS.contains(&name) {
            return Ok(name.to_string());
        }
        if IGNORED.contains(&name) {
            return Ok(String::new());
        }
        if TEXT_COMMANDS.contains(&name) {
            return self.argument(&format!("\\{name}"));
        }
        match name {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument("\\frac")?;
                let den = self.argument("\\frac")?;
                Ok(format!("{}/{}", parenthesize(&num), parenthesize(&den)))
            }
            "sqrt" => {
                let radicand = self.argument("\\sqrt")?;
                Ok(format!("√{}", parenthesize(&radicand)))
            }
            "mathbb" => Ok(self.argument("\\mathbb")?.chars().map(double_struck).collect()),
            "overline" | "bar" => Ok(combine(&self.argument("\\bar")?, '\u{305}')),
            "hat" => Ok(combine(&self.argument("\\hat")?, '\u{302}')),
            "vec" => Ok(combine(&self.argument("\\vec")?, '\u{20d7}')),
            "binom" => {
                let n = self.argument("\\binom")?;
                let k = self.argument("\\binom")?;
                Ok(format!("C({n}, {k})"))
            }
            _ => Err(MathError::UndefinedControlSequence(name.to_string())),
        }
    }
}

/// Keep named functions and words from running into the preceding letter.
fn push_spaced(out: &mut String, rendered: &str) {
    let starts_word = rendered.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let after_word = out.chars().last().is_some_and(char::is_alphanumeric);
    if starts_word && after_word {
        out.push(' ');
    }
    out.push_str(rendered);
}

/// Attach a combining mark to every character.
fn combine(s: &str, mark: char) -> String {
    s.chars().flat_map(|c| [c, mark]).collect()
}

fn parenthesize(s: &str) -> String {
    if s.chars().count() <= 1 || s.chars().all(|c| c.is_ascii_digit()) {
        s.to_string()
    } else {
        format!("({s})")
    }
}

fn script(arg: &str, sup: bool) -> String {
    let mapped: Option<String> = arg
        .chars()
        .map(|c| if sup { superscript(c) } else { subscript(c) })
        .collect();
    let marker = if sup { '^' } else { '_' };
    match mapped {
        Some(s) if !s.is_empty() => s,
        _ if arg.chars().count() == 1 => format!("{marker}{arg}"),
        _ => format!("{marker}({arg})"),
    }
}

const fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'z' => 'ᶻ',
        '′' => '′',
        _ => return None,
    })
}

const fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

const fn double_struck(c: char) -> char {
    match c {
        'N' => 'ℕ',
        'Z' => 'ℤ',
        'Q' => 'ℚ',
        'R' => 'ℝ',
        'C' => 'ℂ',
        'P' => 'ℙ',
        'H' => 'ℍ',
        c => c,
    }
}

/// Collapse runs of spaces (keeping explicit block line breaks) and trim.
fn collapse_whitespace(raw: &str, mode: MathMode) -> String {
    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    match mode {
        MathMode::Inline => lines.join(" ").trim().to_string(),
        MathMode::Block => lines
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
