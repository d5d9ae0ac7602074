/// A leading character that selects the node kind of a script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rune {
    Comment,       // !
    Heading,       // #
    Character,     // @
    Quote,         // >
    Parenthetical, // (
    Effect,        // ^
}

impl Rune {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '!' => Some(Rune::Comment),
            '#' => Some(Rune::Heading),
            '@' => Some(Rune::Character),
            '>' => Some(Rune::Quote),
            '(' => Some(Rune::Parenthetical),
            '^' => Some(Rune::Effect),
            _ => None,
        }
    }
}

/// One script line as seen in normal mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'s> {
    Blank,
    Rune { rune: Rune, text: &'s str },
    TagOpen(&'s str),
    ScopeOpen(&'s str),
    Action(&'s str),
}

/// One script line as seen inside a tag or variables section.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<'s> {
    Entry { key: &'s str, value: &'s str },
    /// No separator, or nothing after it. Closes the section.
    End,
}
