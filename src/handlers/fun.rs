use rand::Rng;
use teloxide::prelude::*;

use crate::types::{BotType, HandlerResult};

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are only two hard things in computer science: cache invalidation, naming things, and off-by-one errors.",
    "A SQL query walks into a bar, walks up to two tables and asks: may I join you?",
    "Why did the developer go broke? Because they used up all their cache.",
    "I would tell you a UDP joke, but you might not get it.",
    "To understand recursion, you must first understand recursion.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "A byte walks into a bar looking miserable. The bartender asks: what's wrong? The byte says: parity error. The bartender nods: I thought you looked a bit off.",
    "Why do Java developers wear glasses? Because they don't C sharp.",
    "I changed my password to 'incorrect', so whenever I forget it the computer tells me: your password is incorrect.",
];

fn pick<R: Rng>(rng: &mut R) -> &'static str {
    JOKES[rng.gen_range(0..JOKES.len())]
}

pub async fn send_joke(bot: &BotType, msg: &Message) -> HandlerResult {
    let joke = pick(&mut rand::thread_rng());
    bot.send_message(msg.chat.id, joke).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn only_returns_jokes_from_the_list() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..200 {
            assert!(JOKES.contains(&pick(&mut rng)));
        }
    }

    #[test]
    fn a_seeded_source_gives_a_deterministic_sequence() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);

        let a: Vec<&str> = (0..32).map(|_| pick(&mut first)).collect();
        let b: Vec<&str> = (0..32).map(|_| pick(&mut second)).collect();
        assert_eq!(a, b);
    }
}
