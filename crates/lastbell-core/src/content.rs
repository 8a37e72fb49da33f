//! Narrative content tables.
//!
//! The simulation treats all text as opaque. Tables can be replaced wholesale
//! at engine construction, typically from a JSON file.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A blackboard arithmetic puzzle. Answers are compared after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathPuzzle {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub hint: String,
}

/// A multiple-choice code reading challenge shown on a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackChallenge {
    pub title: String,
    pub code: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    pub wall_flavor: Vec<String>,
    pub floor_flavor: Vec<String>,
    pub object_flavor: Vec<String>,
    pub idle_monologues: Vec<String>,
    pub scary_monologues: Vec<String>,
    pub hurt_monologues: Vec<String>,
    pub lore_notes: Vec<String>,
    pub tutorial_note: String,
    pub puzzles: Vec<MathPuzzle>,
    pub hacks: Vec<HackChallenge>,
}

impl ContentTables {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tables: ContentTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Every pool the generator or the engine draws from must be non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pools: [(&'static str, bool); 9] = [
            ("wall_flavor", self.wall_flavor.is_empty()),
            ("floor_flavor", self.floor_flavor.is_empty()),
            ("object_flavor", self.object_flavor.is_empty()),
            ("idle_monologues", self.idle_monologues.is_empty()),
            ("scary_monologues", self.scary_monologues.is_empty()),
            ("hurt_monologues", self.hurt_monologues.is_empty()),
            ("lore_notes", self.lore_notes.is_empty()),
            ("puzzles", self.puzzles.is_empty()),
            ("hacks", self.hacks.is_empty()),
        ];
        match pools.iter().find(|(_, empty)| *empty) {
            Some((name, _)) => Err(ConfigError::EmptyPool(name)),
            None => Ok(()),
        }
    }
}

fn lines(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

fn puzzle(question: &str, answer: &str, hint: &str) -> MathPuzzle {
    MathPuzzle {
        question: question.into(),
        answer: answer.into(),
        hint: hint.into(),
    }
}

fn hack(title: &str, code: &str, options: [&str; 4], answer: &str, description: &str) -> HackChallenge {
    HackChallenge {
        title: title.into(),
        code: code.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.into(),
        description: description.into(),
    }
}

impl Default for ContentTables {
    fn default() -> Self {
        Self {
            wall_flavor: lines(&[
                "The wall is covered in scratches, as if someone tried to climb it.",
                "This wall feels... warm.",
                "Black liquid seeps out of the wall. It smells like rust.",
                "Someone carved hundreds of tally marks here with their nails.",
                "Where the wallpaper peeled, moldy bricks show through.",
                "A faint knocking comes from inside the wall.",
                "Written in blood: IT IS WATCHING YOU.",
                "The wall is breathing... I must be losing it.",
                "The cracks are stuffed with strands of black hair.",
                "A whisper from inside the wall: stay.",
                "There is an eye behind that hole.",
                "The water running down the wall is salty. Like tears.",
            ]),
            floor_flavor: lines(&[
                "The floor is sticky. Every step makes a wet sound.",
                "A long smear of blood leads into the dark.",
                "Careful, broken glass. Pieces of a beaker.",
                "A few teeth are scattered on the floor.",
                "One shoe. Where is the other one?",
                "Chalk symbols on the floor, like some kind of ritual.",
                "There is a heartbeat under these tiles.",
                "The floor is covered in dried insects.",
                "Tiny footprints lead straight into the wall.",
            ]),
            object_flavor: lines(&[
                "This has been broken for a long time.",
                "Covered in dust and... is that dried blood?",
                "Who left this here?",
                "Nobody uses these old desks anymore.",
                "Something about this feels wrong.",
                "Someone carved HELP into it.",
                "The desk is stuffed with bloody bandages.",
                "The legs of this chair are made of bone.",
                "Something in the trash can is still twitching.",
            ]),
            idle_monologues: lines(&[
                "It's so quiet my ears are ringing...",
                "The air smells of rust and mold.",
                "I keep feeling eyes on my back...",
                "Was this school always this big?",
                "I can't stop. If I stop, I die.",
                "Remember to breathe... remember to breathe...",
                "I think I've been here before. In a dream.",
                "My watch stopped at 4:44.",
                "This corridor is getting longer...",
                "Don't look back. Don't look back.",
            ]),
            scary_monologues: lines(&[
                "What was that sound?!",
                "Stay away... please stay away...",
                "Footsteps. More than one.",
                "It's moving inside the walls...",
                "The lights are flickering... it's close.",
                "It saw me! It saw me!",
                "It's copying my voice!",
                "Run! Run! Run!",
            ]),
            hurt_monologues: lines(&[
                "Ugh... it hurts...",
                "I'm bleeding...",
                "My vision is blurring...",
                "The wound is burning...",
                "I can't feel my legs...",
                "Something is moving inside the wound...",
            ]),
            lore_notes: lines(&[
                "[Principal's log, 1998-09-21]\nThe basement seal failed. That thing does not obey physics. I locked the elevator and scattered the code across the blackboards.",
                "[Crumpled exam]\nName: Chen\nScore: 0\n(On the back) The teacher isn't the teacher anymore. Its face split open and there was red light inside.",
                "[Nurse's notice]\nVisits for 'mass hallucination' have spiked. Symptoms: fear of light, mumbling, claims of shadows walking.",
                "[Torn diary]\nWe shouldn't have played that game at the end of the B2 corridor. Hua vanished first. Then Qiang.",
                "[Janitor's work order]\nLocation: every classroom. Locks keep failing. The scratches on the handles are from the inside.",
                "[A warning]\nIf you are reading this you are already inside. Remember:\n1. The red one is fast.\n2. The one on the ceiling hates light.\n3. The statue can't move while you watch it.\n4. The screaming one will hurt your mind.\n5. The green one drifts through walls.\nGood luck.",
                "[Experiment record Omega]\nThe subject reacts to human fear. The stronger the fear, the more solid it becomes. Just don't be afraid. Easy to say.",
                "[Broadcast room tape]\n(static)... don't go to the roof... fire... (static)... they come out of the mirrors...",
            ]),
            tutorial_note: "[Survival guide]\nWASD to move, SHIFT to run, C to crouch.\nF toggles the flashlight. Darkness eats your sanity.\nE interacts. Solve blackboard puzzles and hack terminals to unlock the elevator.\nHide in lockers when something is hunting you.".into(),
            puzzles: vec![
                puzzle("A runs 100m in 10s, B in 12.5s. When A finishes, how many meters is B from the line?", "20", "B runs at 8m/s"),
                puzzle("A cube has a surface area of 150 cm2. What is its volume in cm3?", "125", "150 / 6 = 25"),
                puzzle("At 3:30, what is the angle between the hour and minute hands in degrees?", "75", "The hour hand moved half a step"),
                puzzle("Find the pattern: 1, 4, 9, 16, 25, ?", "36", "Perfect squares"),
                puzzle("10 heads and 28 legs of chickens and rabbits. How many rabbits?", "4", "All chickens would be 20 legs"),
                puzzle("A number leaves remainder 2 when divided by 3, 5 and 7. What is the smallest such number above 2?", "107", "Least common multiple + 2"),
                puzzle("Father is 40, son is 10. In how many years will father be 3 times as old?", "5", "Let it be x years"),
                puzzle("Surface area of a 10 x 8 x 5 cm box?", "340", "(lw + wh + hl) x 2"),
                puzzle("1 + 2 + 3 + ... + 100 = ?", "5050", "Pair the ends"),
                puzzle("Three consecutive odd numbers sum to 27. What is the largest?", "11", "The middle one is 9"),
                puzzle("A square's side grows by 20%. By what percent does its area grow?", "44", "1.2 x 1.2"),
                puzzle("Write 'LEVEL' backwards.", "LEVEL", "Palindrome"),
            ],
            hacks: vec![
                hack("PWR_CALC", "int x = 10 * 3;\nprint(x + 5);", ["30", "35", "13", "15"], "35", "Arithmetic"),
                hack("LOGIC_AND", "boolean a = true;\nboolean b = false;\nprint(a && b);", ["true", "false", "null", "error"], "false", "Logical AND"),
                hack("LOGIC_OR", "boolean a = true;\nboolean b = false;\nprint(a || b);", ["true", "false", "null", "error"], "true", "Logical OR"),
                hack("LOOP_SUM", "int sum = 0;\nfor(int i=1; i<=3; i++) sum += i;\nprint(sum);", ["3", "6", "5", "4"], "6", "Sum 1+2+3"),
                hack("MODULO_OP", "int x = 14 % 4;\nprint(x);", ["3.5", "2", "3", "1"], "2", "Remainder"),
                hack("ARRAY_IDX", "int[] arr = {10, 20, 30};\nprint(arr[1]);", ["10", "20", "30", "error"], "20", "Array indexing"),
                hack("INT_DIV", "int x = 7 / 2;\nprint(x);", ["3.5", "3", "4", "error"], "3", "Integer division"),
                hack("OP_PRIORITY", "int x = 2 + 3 * 2;\nprint(x);", ["10", "8", "7", "6"], "8", "Operator precedence"),
                hack("STR_LEN", "string s = \"HELLO\";\nprint(s.length);", ["4", "5", "6", "0"], "5", "String length"),
                hack("TERNARY_OP", "int x = (5 > 3) ? 1 : 2;\nprint(x);", ["1", "2", "5", "3"], "1", "Ternary operator"),
                hack("LOOP_BREAK", "int x=0;\nfor(i=0;i<5;i++) {\n  if(i==2) break;\n  x++;\n}\nprint(x);", ["2", "3", "4", "5"], "2", "Loop break"),
                hack("RETURN_VAL", "int f() { return 5; }\nprint(f() + 1);", ["5", "6", "1", "error"], "6", "Return value"),
            ],
        }
    }
}
