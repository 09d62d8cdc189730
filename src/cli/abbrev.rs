// Command abbreviation matching for the recruit CLI

/// Find all commands that start with the given prefix (case-insensitive)
pub fn find_matching_commands<'a>(prefix: &str, commands: &'a [&str]) -> Vec<&'a str> {
    let prefix_lower = prefix.to_lowercase();
    commands.iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Find a unique command match for the given prefix
/// Returns Ok(command) if exactly one match, Err(matches) if ambiguous, Err(empty) if no match
/// Note: Exact matches take precedence over prefix matches (e.g., "show" matches "show" not "shortlist")
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    let prefix_lower = prefix.to_lowercase();
    for cmd in commands {
        if cmd.to_lowercase() == prefix_lower {
            return Ok(*cmd);
        }
    }

    let matches = find_matching_commands(prefix, commands);

    if matches.is_empty() {
        Err(Vec::new())
    } else if matches.len() == 1 {
        Ok(matches[0])
    } else {
        Err(matches)
    }
}

/// Top-level commands
pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "pipeline", "jobs", "applicants", "offers", "status", "help"
];

pub const PIPELINE_COMMANDS: &[&str] = &[
    "board", "list", "show", "next", "prev", "summary", "breaches", "jobs"
];

pub const JOB_COMMANDS: &[&str] = &[
    "list", "pause", "close", "reopen"
];

pub const APPLICANT_COMMANDS: &[&str] = &[
    "list", "show", "shortlist", "reject", "verify", "advance", "note"
];

pub const OFFER_COMMANDS: &[&str] = &[
    "list", "set-status", "onboard"
];

/// Candidate subcommands (used with the <id> <subcommand> pattern)
pub const CANDIDATE_SUBCOMMANDS: &[&str] = &[
    "next", "prev", "show"
];

/// Get subcommands for a given top-level command
pub fn get_subcommands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "pipeline" => Some(PIPELINE_COMMANDS),
        "jobs" => Some(JOB_COMMANDS),
        "applicants" => Some(APPLICANT_COMMANDS),
        "offers" => Some(OFFER_COMMANDS),
        _ => None,
    }
}

fn ambiguous(kind: &str, arg: &str, matches: &[&str]) -> String {
    format!("Ambiguous {} '{}'. Did you mean one of: {}?", kind, arg, matches.join(", "))
}

/// Expand command abbreviations in argument list
/// Returns expanded args or error message
pub fn expand_command_abbreviations(args: Vec<String>) -> Result<Vec<String>, String> {
    if args.is_empty() {
        return Ok(args);
    }

    let first = &args[0];

    // Candidate-first shorthand: `<id> next` becomes `pipeline next <id>`
    if !first.starts_with('-') && first.parse::<i64>().is_ok() {
        if let Some(next_arg) = args.get(1) {
            if !next_arg.starts_with('-') {
                match find_unique_command(next_arg, CANDIDATE_SUBCOMMANDS) {
                    Ok(full_subcmd) => {
                        let mut expanded = vec!["pipeline".to_string(), full_subcmd.to_string(), first.clone()];
                        expanded.extend(args[2..].iter().cloned());
                        return Ok(expanded);
                    }
                    Err(matches) if !matches.is_empty() => {
                        return Err(ambiguous("candidate subcommand", next_arg, &matches));
                    }
                    Err(_) => {}
                }
            }
        }
        return Ok(args);
    }

    if first.starts_with('-') {
        return Ok(args);
    }

    let full_cmd = match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(cmd) => cmd,
        // No match: let clap report the unknown command
        Err(matches) if matches.is_empty() => return Ok(args),
        Err(matches) => return Err(ambiguous("command", first, &matches)),
    };

    let mut expanded = vec![full_cmd.to_string()];
    let mut rest = args[1..].iter();

    if let Some(subcommands) = get_subcommands(full_cmd) {
        if let Some(next_arg) = args.get(1) {
            if !next_arg.starts_with('-') && next_arg.parse::<i64>().is_err() {
                match find_unique_command(next_arg, subcommands) {
                    Ok(full_subcmd) => {
                        expanded.push(full_subcmd.to_string());
                        rest.next();
                    }
                    Err(matches) if !matches.is_empty() => {
                        return Err(ambiguous("subcommand", next_arg, &matches));
                    }
                    Err(_) => {}
                }
            }
        }
    }

    expanded.extend(rest.cloned());
    Ok(expanded)
}
