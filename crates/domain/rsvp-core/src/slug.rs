pub struct Slug;

impl Slug {
    /// Turn a free-text couple name into the page key.
    ///
    /// `"Mary & John"` becomes `"mary&john"`, other whitespace runs become a
    /// single hyphen, and anything outside `a-z 0-9 & -` (Latin-1 letters
    /// excepted) is dropped.
    pub fn from_names(names: &str) -> String {
        let lowered = names.to_lowercase();
        let joined = collapse_ampersands(lowered.trim());
        let hyphenated = collapse_whitespace(&joined);
        let kept: String = hyphenated.chars().filter(|c| is_slug_char(*c)).collect();
        kept.trim_matches('-').to_string()
    }

    /// The length check callers run before accepting a new slug.
    pub fn is_valid(slug: &str) -> bool {
        slug.chars().count() >= rsvp_config::MIN_SLUG_LEN
    }

    /// Heading derived from a slug when the couple name is not known yet.
    pub fn to_title(slug: &str) -> String {
        slug.split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c == '&'
        || c == '-'
        || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

// `<ws>+&<ws>+` -> `&`, scanning left to right without overlap.
fn collapse_ampersands(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '&' {
            let mut k = j + 1;
            while k < chars.len() && chars[k].is_whitespace() {
                k += 1;
            }
            if k > j + 1 {
                out.push('&');
                i = k;
                continue;
            }
        }
        out.extend(&chars[i..j]);
        i = j;
    }
    out
}

fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
