use crate::model::{
    AppSnapshot, ConcentrationId, ConcentrationOption, ConcentrationScheme, CourseGroup,
    CourseItem, Major, Rule, Section, SectionBody, Slot, SlotLayout, Status,
    CONCENTRATION_SELECTION_KEY,
};
use std::sync::Arc;

pub const DEFAULT_OWNER: &str = "Student";

pub const SYMSYS_KEY: &str = "symsys";
pub const POLISCI_KEY: &str = "polisci";

pub const POLISCI_PRIMARY_MIN_UNITS: f64 = 25.0;
pub const POLISCI_SECONDARY_MIN_UNITS: f64 = 15.0;

const SYMSYS_CONCENTRATIONS: [(&str, &str); 6] = [
    ("human-centered-ai", "Human Centered AI"),
    ("human-computer-interaction", "Human Computer Interaction"),
    ("artificial-intelligence", "Artificial Intelligence"),
    ("computer-music", "Computer Music"),
    ("computational-social-science", "Computational Social Science"),
    ("computational-foundations", "Computational Foundations"),
];

const POLISCI_CONCENTRATIONS: [(&str, &str); 5] = [
    ("data-science", "Data Science"),
    ("elections-governance", "Elections, Representation & Governance"),
    ("international-relations", "International Relations"),
    ("justice-law", "Justice & Law"),
    ("political-economy", "Political Economy & Development"),
];

/// The dataset a fresh workspace (or a reset) starts from.
pub fn default_snapshot() -> AppSnapshot {
    AppSnapshot {
        owner: DEFAULT_OWNER.to_string(),
        majors: vec![Arc::new(symbolic_systems()), Arc::new(political_science())],
    }
}

fn options(table: &[(&str, &str)]) -> Vec<ConcentrationOption> {
    table
        .iter()
        .map(|(id, label)| ConcentrationOption {
            id: ConcentrationId::new(*id),
            label: label.to_string(),
        })
        .collect()
}

/// Scheme for snapshots written before majors carried one explicitly.
pub fn legacy_scheme(major_key: &str) -> Option<ConcentrationScheme> {
    match major_key {
        SYMSYS_KEY => Some(ConcentrationScheme::new(
            SlotLayout::Single,
            options(&SYMSYS_CONCENTRATIONS),
        )),
        POLISCI_KEY => Some(ConcentrationScheme::new(
            SlotLayout::Dual {
                primary_min_units: POLISCI_PRIMARY_MIN_UNITS,
                secondary_min_units: POLISCI_SECONDARY_MIN_UNITS,
            },
            options(&POLISCI_CONCENTRATIONS),
        )),
        _ => None,
    }
}

pub fn attach_legacy_schemes(snapshot: &mut AppSnapshot) {
    for major in snapshot.majors.iter_mut() {
        if major.concentration.is_some() {
            continue;
        }
        if let Some(scheme) = legacy_scheme(&major.key) {
            Arc::make_mut(major).concentration = Some(scheme);
        }
    }
}

fn course(code: &str, title: &str, units: f64) -> CourseItem {
    CourseItem::new(code, title, units)
}

fn section(
    key: &str,
    title: &str,
    description: &str,
    rule: Option<Rule>,
    body: SectionBody,
    editable: bool,
) -> Arc<Section> {
    Arc::new(Section {
        key: key.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        rule,
        body,
        editable,
    })
}

fn listed(
    key: &str,
    title: &str,
    description: &str,
    rule: Rule,
    items: Vec<CourseItem>,
) -> Arc<Section> {
    section(key, title, description, Some(rule), SectionBody::Items(items), false)
}

fn editable(
    key: &str,
    title: &str,
    description: &str,
    rule: Rule,
    items: Vec<CourseItem>,
) -> Arc<Section> {
    section(key, title, description, Some(rule), SectionBody::Items(items), true)
}

fn grouped(
    key: &str,
    title: &str,
    description: &str,
    rule: Rule,
    groups: Vec<CourseGroup>,
) -> Arc<Section> {
    section(key, title, description, Some(rule), SectionBody::Groups(groups), false)
}

fn parent(key: &str, title: &str, description: &str, children: Vec<Arc<Section>>) -> Arc<Section> {
    section(key, title, description, None, SectionBody::Subsections(children), false)
}

fn group(key: &str, title: &str, items: Vec<CourseItem>) -> CourseGroup {
    CourseGroup {
        key: key.to_string(),
        title: title.to_string(),
        items,
    }
}

fn selection_section(description: &str, slots: &[Slot]) -> Arc<Section> {
    let selectors = slots
        .iter()
        .map(|slot| CourseItem {
            code: slot.selector_code().to_string(),
            title: slot.selector_title().to_string(),
            units: 0.0,
            status: Status::Unset,
        })
        .collect();
    section(
        CONCENTRATION_SELECTION_KEY,
        "Concentration Selection",
        description,
        Some(Rule::OneOf),
        SectionBody::Items(selectors),
        false,
    )
}

fn concentration_key(id: &str) -> String {
    ConcentrationScheme::course_section_key(&ConcentrationId::new(id))
}

fn symsys_concentration(id: &str, label: &str, items: Vec<CourseItem>) -> Arc<Section> {
    section(
        &concentration_key(id),
        &format!("{} Concentration", label),
        "Complete every course in your concentration.",
        Some(Rule::AllOf),
        SectionBody::Items(items),
        false,
    )
}

fn polisci_track(id: &str, label: &str, items: Vec<CourseItem>) -> Arc<Section> {
    section(
        &concentration_key(id),
        &format!("{} Track", label),
        "Courses counted toward this track. Add the courses you take.",
        Some(Rule::UnitsAtLeast {
            min_units: POLISCI_SECONDARY_MIN_UNITS,
            also_require_one_of_group_keys: None,
        }),
        SectionBody::Items(items),
        true,
    )
}

fn symsys_concentration_sections() -> Vec<Arc<Section>> {
    let [hcai, hci, ai, music, css, foundations] = SYMSYS_CONCENTRATIONS;
    vec![
        symsys_concentration(
            hcai.0,
            hcai.1,
            vec![
                course("CS 221", "Artificial Intelligence: Principles and Techniques", 4.0),
                course("CS 224N", "Natural Language Processing with Deep Learning", 4.0),
                course("CS 278", "Social Computing", 3.0),
                course("CS 281", "Ethics of Artificial Intelligence", 3.0),
                course("PSYCH 204", "Computation and Cognition: the Probabilistic Approach", 3.0),
            ],
        ),
        symsys_concentration(
            hci.0,
            hci.1,
            vec![
                course("CS 147", "Introduction to Human-Computer Interaction Design", 3.0),
                course("CS 247B", "Design for Behavior Change", 4.0),
                course("CS 347", "Human-Computer Interaction: Foundations and Frontiers", 3.0),
                course("PSYCH 30", "Introduction to Perception", 3.0),
                course("COMM 166", "Virtual People", 4.0),
            ],
        ),
        symsys_concentration(
            ai.0,
            ai.1,
            vec![
                course("CS 221", "Artificial Intelligence: Principles and Techniques", 4.0),
                course("CS 228", "Probabilistic Graphical Models", 3.0),
                course("CS 229", "Machine Learning (STATS 229)", 3.0),
                course("CS 224N", "Natural Language Processing with Deep Learning", 4.0),
                course("CS 238", "Decision Making under Uncertainty", 3.0),
            ],
        ),
        symsys_concentration(
            music.0,
            music.1,
            vec![
                course("MUSIC 21", "Elements of Music I", 4.0),
                course("MUSIC 151", "Psychophysics and Cognitive Psychology for Musicians", 4.0),
                course("MUSIC 220A", "Fundamentals of Computer-Generated Sound", 4.0),
                course("MUSIC 220B", "Compositional Algorithms, Psychoacoustics, and Computational Music", 4.0),
                course("MUSIC 256A", "Music, Computing, Design", 4.0),
            ],
        ),
        symsys_concentration(
            css.0,
            css.1,
            vec![
                course("POLISCI 150B", "Machine Learning for Social Scientists", 5.0),
                course("SOC 128D", "Mining Culture Through Text Data", 4.0),
                course("ECON 102B", "Applied Econometrics", 5.0),
                course("CS 224W", "Machine Learning with Graphs", 4.0),
                course("MS&E 135", "Networks", 3.0),
            ],
        ),
        symsys_concentration(
            foundations.0,
            foundations.1,
            vec![
                course("CS 161", "Design and Analysis of Algorithms", 5.0),
                course("CS 154", "Introduction to Automata and Complexity Theory", 4.0),
                course("CS 168", "The Modern Algorithmic Toolbox", 3.0),
                course("CS 254", "Computational Complexity", 3.0),
                course("MATH 113", "Linear Algebra and Matrix Theory", 3.0),
            ],
        ),
    ]
}

fn polisci_track_sections() -> Vec<Arc<Section>> {
    let [ds, egov, ir, law, pe] = POLISCI_CONCENTRATIONS;
    vec![
        polisci_track(
            ds.0,
            ds.1,
            vec![
                course("POLISCI 150B", "Machine Learning for Social Scientists", 5.0),
                course("POLISCI 150C", "Causal Inference for Social Science", 5.0),
            ],
        ),
        polisci_track(
            egov.0,
            egov.1,
            vec![
                course("POLISCI 120B", "Campaigns, Voting, Media, and Elections", 5.0),
                course("POLISCI 123", "Politics and Public Policy", 5.0),
            ],
        ),
        polisci_track(
            ir.0,
            ir.1,
            vec![
                course("POLISCI 101", "Introduction to International Relations", 5.0),
                course("POLISCI 114S", "International Security in a Changing World", 5.0),
            ],
        ),
        polisci_track(
            law.0,
            law.1,
            vec![
                course("POLISCI 103", "Justice", 5.0),
                course("POLISCI 125P", "Constitutional Law", 5.0),
            ],
        ),
        polisci_track(
            pe.0,
            pe.1,
            vec![
                course("POLISCI 110C", "America and the World Economy", 5.0),
                course("POLISCI 140L", "The Political Economy of Development", 5.0),
            ],
        ),
    ]
}

pub fn symbolic_systems() -> Major {
    let mut sections = vec![
        listed(
            "gateway",
            "Gateway Course",
            "Take ONE of the following courses. Must be completed before major declaration can be approved.",
            Rule::OneOf,
            vec![
                course("SYMSYS 1", "Minds and Machines", 4.0),
                course("CS 24", "Minds & Machines (alt)", 4.0),
                course("LINGUIST 35", "Minds & Machines (alt)", 4.0),
                course("PHIL 99", "Minds & Machines (alt)", 4.0),
                course("PSYCH 35", "Minds & Machines (alt)", 4.0),
            ],
        ),
        grouped(
            "calc-la",
            "Calculus & Linear Algebra (≥14 units total)",
            "Take at least 14 units total from the courses below. You MUST take at least ONE course from the Multivariate/Linear Algebra group.",
            Rule::UnitsAtLeast {
                min_units: 14.0,
                also_require_one_of_group_keys: Some(vec!["multivar".to_string()]),
            },
            vec![
                group(
                    "singlevar",
                    "Single Variable Calculus (take any combination)",
                    vec![
                        course("MATH 19", "Calculus", 3.0),
                        course("MATH 20", "Calculus", 3.0),
                        course("MATH 21", "Calculus", 4.0),
                        course("AP-6U", "AP/Exam Credit (6u replaces 19+20)", 6.0),
                        course("AP-10U", "AP/Exam Credit (10u replaces 19+20+21)", 10.0),
                    ],
                ),
                group(
                    "multivar",
                    "Multivariate Calculus and Linear Algebra (take at least ONE)",
                    vec![
                        course("MATH 51", "Linear Algebra, Multivariable Calculus, and Modern Applications", 5.0),
                        course("CME 100", "Vector Calculus for Engineers (ENGR 154)", 5.0),
                        course("MATH 52", "Integral Calculus of Several Variables", 5.0),
                        course("MATH 53", "Differential Equations with Linear Algebra, Fourier Methods, and Modern Applications", 5.0),
                        course("MATH 61CM", "Modern Mathematics: Continuous Methods", 5.0),
                        course("MATH 61DM", "Modern Mathematics: Discrete Methods", 5.0),
                        course("MATH 62CM", "Modern Mathematics: Continuous Methods", 5.0),
                        course("MATH 62DM", "Modern Mathematics: Discrete Methods", 5.0),
                        course("MATH 63CM", "Modern Mathematics: Continuous Methods", 5.0),
                        course("CME 102", "Ordinary Differential Equations for Engineers (ENGR 155A)", 5.0),
                        course("CME 104", "Linear Algebra and Partial Differential Equations for Engineers (ENGR 155B)", 5.0),
                    ],
                ),
            ],
        ),
        parent(
            "philosophy",
            "Philosophy",
            "Philosophy courses covering mind, language, and formal methods.",
            vec![
                listed(
                    "intro-phil",
                    "Introductory Philosophy Course",
                    "Take ONE of the following: an introductory Philosophy course (3+ units) or a Thinking Matters course taught by Philosophy faculty.",
                    Rule::OneOf,
                    vec![
                        course("PHIL Intro", "Any course of 3 units or more listed with a PHIL course number (except PHIL 99/SYMSYS 1)", 3.0),
                        course("THINK 69", "Emotion", 4.0),
                    ],
                ),
                listed(
                    "mind-meaning",
                    "Mind, Matter, and Meaning",
                    "Take ALL of the following required course.",
                    Rule::AllOf,
                    vec![
                        course("PHIL 80", "Mind, Matter, and Meaning", 4.0),
                    ],
                ),
                listed(
                    "advanced-phil",
                    "Advanced Philosophy Course",
                    "Take ONE of the following advanced Philosophy courses that list PHIL 80 as a prerequisite.",
                    Rule::OneOf,
                    vec![
                        course("PHIL 86", "How to Make a Moral Agent (CS 186)", 4.0),
                        course("PHIL 107B", "Plato's Later Metaphysics and Epistemology", 4.0),
                        course("PHIL 132", "Phenomenology: Merleau-Ponty (PHIL 232)", 4.0),
                        course("PHIL 160", "What are Laws of Nature? (PHIL 260)", 4.0),
                        course("PHIL 164", "Scientific Realism, Perspectivism, and Antirealism (PHIL 264)", 4.0),
                        course("PHIL 167D", "Philosophy of Neuroscience (PHIL 267D, SYMSYS 206A)", 4.0),
                        course("PHIL 173B", "Metaethics", 4.0),
                        course("PHIL 175", "Philosophy of Law", 4.0),
                        course("PHIL 180", "Metaphysics (PHIL 280)", 4.0),
                        course("PHIL 181", "Philosophy of Language (PHIL 281)", 4.0),
                        course("PHIL 181A", "Philosophy of Language (PHIL 281A)", 4.0),
                        course("PHIL 182H", "Truth (PHIL 282H)", 4.0),
                        course("PHIL 184", "Formal and Informal Epistemology (PHIL 284)", 4.0),
                        course("PHIL 184B", "Formal Epistemology", 4.0),
                        course("PHIL 184D", "Collective Epistemology and Shared Inquiry", 4.0),
                        course("PHIL 185J", "The Philosophy and Science of Perception (SYMSYS 205)", 4.0),
                        course("PHIL 186", "Philosophy of Mind (PHIL 286)", 4.0),
                        course("PHIL 187", "Philosophy of Action (PHIL 287)", 4.0),
                        course("PHIL 188A", "Explanation (PHIL 288A)", 4.0),
                        course("PHIL 188B", "Advanced Undergrad Seminar: Striving and the Nature of Belief", 4.0),
                        course("PHIL 189", "Reduction and Grounding (PHIL 289)", 4.0),
                        course("SYMSYS 207", "Conceptual Issues in Cognitive Science", 4.0),
                    ],
                ),
            ],
        ),
        parent(
            "formal-methods",
            "Formal Methods",
            "Courses covering logic, proof, and formal reasoning.",
            vec![
                listed(
                    "logic",
                    "Logic",
                    "Take ONE of the following courses in mathematical logic.",
                    Rule::OneOf,
                    vec![
                        course("PHIL 150", "Mathematical Logic (PHIL 250)", 4.0),
                        course("PHIL 151", "Metalogic (PHIL 251) [prerequisite: PHIL 150 or instructor permission]", 4.0),
                        course("CS 157", "Computational Logic", 4.0),
                    ],
                ),
                listed(
                    "proof-methods",
                    "Proof Methods",
                    "Take ALL of the following courses covering proof techniques and mathematical reasoning.",
                    Rule::AllOf,
                    vec![
                        course("PHIL 49", "Survey of Formal Methods", 3.0),
                        course("MATH 56", "Proofs and Modern Mathematics", 3.0),
                    ],
                ),
                listed(
                    "theory-comp",
                    "Theory of Computation",
                    "Take ONE of the following courses covering theoretical computer science concepts.",
                    Rule::OneOf,
                    vec![
                        course("CS 103", "Mathematical Foundations of Computing [corequisite: CS 106B or X]", 5.0),
                        course("CS 154", "Introduction to Automata and Complexity Theory [prerequisite: CS103 or significant proof-writing experience]", 4.0),
                        course("PHIL 152", "Computability and Logic (PHIL 252) [prerequisite: PHIL 151]", 4.0),
                    ],
                ),
            ],
        ),
        listed(
            "probability",
            "Probability Theory and Statistics",
            "Take ONE of the following courses that covers probability theory and is grounded in multivariable calculus.",
            Rule::OneOf,
            vec![
                course("CS 109", "Introduction to Probability for Computer Scientists", 5.0),
                course("STATS 116", "Theory of Probability", 4.0),
                course("STATS 110", "Statistical Methods in Engineering and the Physical Sciences", 4.0),
                course("MS&E 120", "Probabilistic Analysis", 4.0),
                course("MS&E 220", "Probabilistic Analysis", 4.0),
                course("EE 178", "Probabilistic Systems Analysis (same as EE 278A)", 4.0),
                course("CME 106", "Introduction to Probability and Statistics for Engineers (ENGR 155C)", 5.0),
                course("MATH 151", "Introduction to Probability Theory", 3.0),
                course("MATH 63DM", "Modern Mathematics: Discrete Methods", 5.0),
            ],
        ),
        parent(
            "computation",
            "Computation",
            "Programming and computer science fundamentals.",
            vec![
                listed(
                    "intro-programming",
                    "Introduction to Programming",
                    "Take ALL of the following required course.",
                    Rule::AllOf,
                    vec![
                        course("CS 106A", "Programming Methodology", 5.0),
                    ],
                ),
                listed(
                    "data-structures",
                    "Data Structures",
                    "Take ONE of the following advanced programming courses with data structures.",
                    Rule::OneOf,
                    vec![
                        course("CS 106B", "Programming Abstractions", 5.0),
                        course("CS 106X", "Programming Abstractions (Accelerated)", 5.0),
                    ],
                ),
                listed(
                    "post106b",
                    "Post-CS 106B Methods Course",
                    "Take ONE of the following post-CS 106B courses covering computational methods with substantial programming.",
                    Rule::OneOf,
                    vec![
                        course("CS 107", "Computer Organization and Systems", 5.0),
                        course("CS 107E", "Computer Systems from the Ground Up", 5.0),
                        course("CS 129", "Applied Machine Learning", 3.0),
                        course("CS 147L", "Cross-platform Mobile App Development", 3.0),
                        course("CS 221", "Artificial Intelligence: Principles and Techniques", 4.0),
                        course("CS 229", "Machine Learning (STATS 229)", 3.0),
                        course("CS 229S", "Systems for Machine Learning", 3.0),
                        course("CS 230", "Deep Learning", 3.0),
                    ],
                ),
            ],
        ),
        parent(
            "cognition-neuro",
            "Cognition, Language, and Neuroscience",
            "Courses covering human cognition, language, and brain function.",
            vec![
                listed(
                    "intro-psych",
                    "Introduction to Psychology",
                    "Basic psychology course.",
                    Rule::AllOf,
                    vec![
                        course("PSYCH 1", "Introduction to Psychology", 5.0),
                    ],
                ),
                listed(
                    "intro-area",
                    "Introductory Area Course",
                    "A course covering a disciplinary division or subdivision, in cognition, language, and neuroscience.",
                    Rule::OneOf,
                    vec![
                        course("BIO 150", "Human Behavioral Biology (HUMBIO 160)", 5.0),
                        course("LINGUIST 105", "Phonetics (LINGUIST 205A)", 4.0),
                        course("LINGUIST 130A", "Introduction to Semantics and Pragmatics (LINGUIST 230A)", 4.0),
                        course("LINGUIST 130B", "Introduction to Lexical Semantics", 4.0),
                        course("LINGUIST 145", "Introduction to Psycholinguistics (LINGUIST 245A, PSYCH 140)", 4.0),
                        course("LINGUIST 150", "Language and Society", 4.0),
                        course("PSYCH 30", "Introduction to Perception", 3.0),
                        course("PSYCH 45", "Introduction to Learning and Memory", 3.0),
                        course("PSYCH 50", "Introduction to Cognitive Neuroscience", 3.0),
                        course("PSYCH 60", "Introduction to Developmental Psychology", 3.0),
                        course("PSYCH 70", "Self and Society: Introduction to Social Psychology (SOC 2)", 3.0),
                        course("PSYCH 75", "Introduction to Cultural Psychology", 3.0),
                        course("PSYCH 141", "Cognitive Development", 3.0),
                        course("PSYCH 154", "Judgment and Decision-Making", 3.0),
                    ],
                ),
                listed(
                    "ling-theory",
                    "Linguistic Theory",
                    "A course applying formal methods to language and communication.",
                    Rule::OneOf,
                    vec![
                        course("LINGUIST 110", "Introduction to Phonology", 4.0),
                        course("LINGUIST 116A", "Introduction to Word Formation", 4.0),
                        course("LINGUIST 121A", "The Syntax of English", 4.0),
                        course("LINGUIST 121B", "Crosslinguistic Syntax", 4.0),
                        course("LINGUIST 130A", "Introduction to Semantics and Pragmatics (LINGUIST 230A)", 4.0),
                        course("LINGUIST 130B", "Introduction to Lexical Semantics", 4.0),
                        course("LINGUIST 134A", "The Structure of Discourse: Theory and Applications (LINGUIST 234)", 4.0),
                        course("LINGUIST 145", "Introduction to Psycholinguistics (LINGUIST 245A, PSYCH 140)", 4.0),
                        course("LINGUIST 160", "Historical Linguistics", 4.0),
                    ],
                ),
            ],
        ),
        listed(
            "cross-area",
            "Cross-Area Requirement",
            "A non-introductory course, which has as a prerequisite at least one Core course (or equivalent), and which combines methods and subject matter from at least two Breadth areas in the Core.",
            Rule::AtLeast { count: 1 },
            vec![
                course("CS 147", "Introduction to Human-Computer Interaction Design", 3.0),
                course("CS 229", "Machine Learning (STATS 229)", 3.0),
                course("LINGUIST 130A", "Introduction to Semantics and Pragmatics (LINGUIST 230A)", 4.0),
                course("LINGUIST 180", "From Languages to Information (CS 124, LINGUIST 280)", 4.0),
                course("PHIL 152", "Computability and Logic (PHIL 152)", 4.0),
                course("PHIL 154", "Modal Logic (PHIL 254)", 4.0),
                course("PHIL 167D", "Philosophy of Neuroscience", 4.0),
                course("PHIL 181", "Philosophy of Language (PHIL 281)", 4.0),
                course("PHIL 181A", "Philosophy of Language (PHIL 281A)", 4.0),
                course("PSYCH 204", "Computation and Cognition: the Probabilistic Approach", 3.0),
                course("PSYCH 209", "Neural Network Models of Cognition", 3.0),
            ],
        ),
        listed(
            "advanced-seminar",
            "Advanced Small Seminar Requirement*",
            "An approved course which builds on the Core Preparations and Breadth Requirements, enrolls no more than 20 students, and is an interactive, discussion-based seminar. *May be double-counted for an applicable Concentration requirement, but not for a Core requirement.",
            Rule::AtLeast { count: 1 },
            vec![
                course("Approved Course", "An approved course meeting the criteria above", 3.0),
            ],
        ),
    ];
    sections.push(selection_section(
        "Choose ONE concentration from the options below. You must complete all requirements for your selected concentration.",
        SlotLayout::Single.slots(),
    ));
    sections.extend(symsys_concentration_sections());
    sections.push(
        parent(
            "capstone",
            "Capstone",
            "An experiential requirement consisting of the following components, planned in consultation with, and approved by, a student's Concentration Adviser (3 or more units each). To obtain approval for your Capstone plan, please submit the Capstone Approval Form. Note, this form must be submitted in addition to your Symsys Course Plan. Additionally, your Capstone plan is subject to final approval by the Symbolic Systems Program office. The Capstone Approval form must be approved by end of first week of Winter Quarter, Junior Year (or the 8th quarter of undergraduate enrollment).",
            vec![
                listed(
                    "practicum",
                    "Practicum (choose one)",
                    "Choose one of the following practicum options:",
                    Rule::OneOf,
                    vec![
                        course("SYMSYS 190", "Senior Honors Tutorial (taken under a student's Honors Adviser)", 3.0),
                        course("SYMSYS 195-series OR CS 177", "A course with a SYMSYS listing in the 195-series OR CS 177: Human-Centered Project Management (approved advanced project course integrating across breadth areas)", 3.0),
                        course("SYMSYS 196 OR Department-based", "Supervised research with a faculty member on an approved Symbolic Systems–related project, taken as SYMSYS 196: Independent Study, OR one of the following department-based courses: (COMM 199: Individual Work; CS 197: Computer Science Research; CS 199: Independent Work; EDUC 190: Directed Research in Education; LINGUIST 199: Independent Study; MATH 360: Advanced Reading and Research; MUSIC 220D: Research in Computer-Generated Music; NBIO 199: Undergraduate Research; PHIL 196: Tutorial (Senior Year); PHIL 197: Individual Work, Undergraduate; PSYCH 195: Special Laboratory Projects; PSYCH 199: Individually Supervised Practicum; STATS 199: Independent Study)", 3.0),
                        course("SYMSYS 192", "Symbolic Systems in Practice (must be taken in conjunction with an approved internship or service project)", 3.0),
                        course("Teaching Practicum", "One of the following, taken in conjunction with section leading in a SymSys Core course: (SYMSYS 197: Practicum in Teaching SYMSYS 1; PSYCH 182: Practicum in Teaching PSYCH 1; CS 198: Teaching Computer Science)", 3.0),
                    ],
                ),
                listed(
                    "integrative",
                    "Integrative Requirement (choose one, after Junior Year)",
                    "Choose one of the following integrative options (must be completed after Junior Year):",
                    Rule::OneOf,
                    vec![
                        course("SYMSYS 190 (continuation)", "SYMSYS 190: Senior Honors Tutorial (continuation of the course taken for the Practicum requirement)", 3.0),
                        course("SYMSYS 195-series OR CS 177", "A course with a SYMSYS listing in the 195-series OR CS 177: Human-Centered Project Management (approved advanced project course integrating across breadth areas)", 3.0),
                        course("SYMSYS 196 OR Department-based", "Supervised research with a faculty member on an approved Symbolic Systems–related project, taken as SYMSYS 196: Independent Study, OR one of the following department-based courses: (COMM 199: Individual Work; CS 197: Computer Science Research; CS 199: Independent Work; EDUC 190: Directed Research in Education; LINGUIST 199: Independent Study; MATH 360: Advanced Reading and Research; MUSIC 220D: Research in Computer-Generated Music; NBIO 199: Undergraduate Research; PHIL 196: Tutorial (Senior Year); PHIL 197: Individual Work, Undergraduate; PSYCH 195: Special Laboratory Projects; PSYCH 199: Individually Supervised Practicum; STATS 199: Independent Study)", 3.0),
                        course("CSIC", "An approved Concentration-Specific Integrative Course (CSIC) taken within a Concentration (integrates the themes of the Concentration with Core requirements outside that area)", 3.0),
                    ],
                ),
                listed(
                    "presentation",
                    "Presentation Requirement (check-off only, not a course)",
                    "Complete one of the following presentation requirements (this is not a course requirement, just a check-off):",
                    Rule::OneOf,
                    vec![
                        course("Autumn Poster Fair", "Symbolic Systems Autumn Poster Fair (for Summer interns and Capstone Projects)", 0.0),
                        course("Spring Graduation Fair", "Symbolic Systems Spring Graduation Fair (for Capstone and Master's Projects)", 0.0),
                        course("Senior Honors Forum", "Symbolic Systems Senior Honors Forum (end of Spring Quarter)", 0.0),
                    ],
                ),
            ],
        ),
    );

    Major {
        key: SYMSYS_KEY.to_string(),
        title: "Symbolic Systems (Core Requirements)".to_string(),
        sections,
        concentration: legacy_scheme(SYMSYS_KEY),
    }
}

pub fn political_science() -> Major {
    let mut sections = vec![
        listed(
            "intro",
            "Introduction Course",
            "Must be taken in freshman or sophomore year.",
            Rule::AllOf,
            vec![
                course("POLISCI 1", "The Science of Politics", 5.0),
            ],
        ),
        listed(
            "methods",
            "Methods Course",
            "Select one of the following methods courses.",
            Rule::OneOf,
            vec![
                course("POLISCI 150A", "Data Science for Politics", 5.0),
                course("STATS 60", "Introduction to Statistical Methods: Precalculus", 4.0),
                course("STATS 101", "Data Science 101", 5.0),
                course("ECON 102A", "Intro to Statistical Methods (Postcalculus) for Social Scientists", 5.0),
                course("CS 106A", "Programming Methodology", 5.0),
                course("CS 106B", "Programming Abstractions", 5.0),
            ],
        ),
    ];
    sections.push(selection_section(
        "Choose a primary track (at least 25 units) and a secondary track (at least 15 units).",
        SlotLayout::Dual {
            primary_min_units: POLISCI_PRIMARY_MIN_UNITS,
            secondary_min_units: POLISCI_SECONDARY_MIN_UNITS,
        }
        .slots(),
    ));
    sections.extend(polisci_track_sections());
    sections.extend([
        editable(
            "additional",
            "Additional Related Coursework (≥20 units)",
            "Additional Political Science coursework to reach the 70-unit minimum.",
            Rule::UnitsAtLeast {
                min_units: 20.0,
                also_require_one_of_group_keys: None,
            },
            vec![
                course("POLISCI-ADD-1", "Add related POLISCI course", 4.0),
            ],
        ),
        editable(
            "seminar",
            "Undergraduate Seminar (200- or 300-level)",
            "Take one 5-unit POLISCI 200- or 300-level undergraduate seminar.",
            Rule::AtLeast { count: 1 },
            vec![
                course("POLISCI 2xx/3xx", "Designated undergraduate seminar", 5.0),
            ],
        ),
        listed(
            "wim",
            "Writing in the Major (WIM)",
            "Select one of the following WIM courses. Note: POLISCI 299A only fulfills the WIM requirement for students writing an Honors Thesis.",
            Rule::OneOf,
            vec![
                course("POLISCI 103", "Justice", 5.0),
                course("POLISCI 110C", "America and the World Economy", 5.0),
                course("POLISCI 110D", "War and Peace in American Foreign Policy", 5.0),
                course("POLISCI 120C", "American Political Institutions in Uncertain Times", 5.0),
                course("POLISCI 121", "Political Power in American Cities", 5.0),
                course("POLISCI 148", "Chinese Politics", 5.0),
                course("POLISCI 236S", "Ethical & Effective Philanthropy for Sustainable Development", 5.0),
                course("POLISCI 299A", "Research Design (WIM only if writing Honors Thesis)", 5.0),
            ],
        ),
        listed(
            "capstone",
            "Capstone — one of",
            "Beginning AY 2024: complete either a Senior Honors Thesis or a designated POLISCI capstone seminar (200-level).",
            Rule::OneOf,
            vec![
                course("CAP-Seminar", "Capstone Seminar (designated 200-level)", 5.0),
                course("CAP-Honors", "Senior Honors Thesis", 5.0),
            ],
        ),
    ]);

    Major {
        key: POLISCI_KEY.to_string(),
        title: "Political Science B.A.".to_string(),
        sections,
        concentration: legacy_scheme(POLISCI_KEY),
    }
}
