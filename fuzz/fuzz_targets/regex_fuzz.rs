#![no_main]
use libfuzzer_sys::fuzz_target;
use munch::automata::Dfa;
use munch::lexer::regex;

// Short probe strings over the characters the pattern itself uses
fn probes(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().filter(|c| c.is_alphanumeric()).take(3).collect();
    let mut probes = vec![String::new()];
    for &a in &chars {
        probes.push(a.to_string());
        for &b in &chars {
            probes.push(format!("{a}{b}"));
        }
    }
    probes
}

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if source.len() > 64 {
        return;
    }
    let Ok(pattern) = regex::parse(source) else {
        return;
    };
    let Ok(nfa) = pattern.to_nfa() else {
        return;
    };
    // Keep subset construction bounded
    if nfa.state_count() > 256 {
        return;
    }
    let dfa = Dfa::from_nfa(&nfa);
    let min = dfa.minimize();
    assert!(min.state_count() <= dfa.state_count());
    assert_eq!(min.minimize(), min);
    for probe in probes(source) {
        assert_eq!(nfa.accepts(&probe), dfa.accepts(&probe), "{source:?} on {probe:?}");
        assert_eq!(dfa.accepts(&probe), min.accepts(&probe), "{source:?} on {probe:?}");
    }
});
