//! Phrase tables shared by the classifier and the dimension scorers.
//!
//! Every entry is lowercase; callers match against lowercased turn text.

pub const SOLUTION_PITCH: &[&str] = &[
    "our product",
    "our solution",
    "our service",
    "our platform",
    "our software",
    "we offer",
    "we provide",
    "let me tell you about",
    "let me show you",
    "i recommend",
    "you should buy",
];

pub const IMPLICATION: &[&str] = &[
    "impact",
    "affect",
    "consequence",
    "what happens if",
    "what happens when",
    "result in",
    "lead to",
    "cost you",
    "knock-on",
    "downstream",
];

pub const QUANTIFICATION: &[&str] = &[
    "how much",
    "how many",
    "percentage",
    "percent",
    "%",
    "hours",
    "euros",
    "dollars",
    "€",
    "$",
    "budget",
    "per month",
    "per year",
];

pub const OPEN_STARTERS: &[&str] = &[
    "what",
    "how",
    "why",
    "tell me",
    "describe",
    "explain",
    "could you elaborate",
];

pub const CLOSED_STARTERS: &[&str] = &[
    "do you", "are you", "is it", "have you", "can you", "will you", "did you",
];

pub const NEED_PAYOFF_INDICATORS: &[&str] = &[
    "would it help",
    "would that help",
    "would it be useful",
    "what if you could",
    "if you could",
    "how valuable",
    "what would it mean",
    "benefit",
    "ideal solution",
];

pub const IMPLICATION_INDICATORS: &[&str] = &[
    "impact",
    "affect",
    "consequence",
    "what happens if",
    "result in",
    "lead to",
    "cost you",
    "what does that mean for",
];

pub const PROBLEM_INDICATORS: &[&str] = &[
    "problem",
    "challenge",
    "difficult",
    "issue",
    "frustrat",
    "struggle",
    "concern",
    "dissatisfied",
    "bottleneck",
    "not working",
];

pub const SITUATION_INDICATORS: &[&str] = &[
    "currently",
    "how many",
    "what system",
    "what tools",
    "how long have you",
    "tell me about your",
    "who is responsible",
    "what does your",
    "describe your",
];

pub const FORBIDDEN: &[&str] = &[
    "guarantee",
    "trust me",
    "best",
    "great deal",
    "cheapest",
    "no-brainer",
    "limited time",
    "sign today",
];

pub const ENCOURAGED: &[&str] = &[
    "perhaps",
    "might",
    "possibly",
    "it seems",
    "i'm curious",
    "i wonder",
    "help me understand",
    "would it be fair to say",
];

pub const DISARMING: &[&str] = &[
    "i'm not sure if we can help",
    "i'm not sure we're a fit",
    "not sure if this is a fit",
    "this may not be relevant",
    "you may not be a fit",
    "i don't know if this applies",
];

pub const CONFIRMING: &[&str] = &[
    "i noticed",
    "i understand that",
    "i read that",
    "i saw that",
    "from what i understand",
    "is that still accurate",
    "is that correct",
    "am i right",
];

pub const MONETIZATION_ASK: &[&str] = &[
    "how much does",
    "how much is",
    "how much would",
    "how many hours",
    "quantify",
    "put a number",
    "what does that cost",
    "budget impact",
    "in euros",
    "in dollars",
    "€",
    "$",
];

pub const MONETIZATION_RESPONSE: &[&str] = &[
    "€",
    "$",
    "euro",
    "dollar",
    "percent",
    "%",
    "hours per",
    "per month",
    "per week",
    "per year",
    "annually",
    "thousand",
    "million",
];

pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

pub fn starts_with_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.starts_with(phrase))
}

/// Non-overlapping occurrences of every phrase, summed.
pub fn count_occurrences(text: &str, phrases: &[&str]) -> usize {
    phrases
        .iter()
        .map(|phrase| text.matches(phrase).count())
        .sum()
}
