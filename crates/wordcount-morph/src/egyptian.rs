//! Default tables for Egyptian Arabic (Masri).
//!
//! Affixes are listed in the order they are tried. Within a category, an affix
//! that can also occur as part of a longer one comes after it.

use wordcount_types::Marker;

use crate::rules::{Affix, AffixRule, EndingFixup, Fold, JoinPair, Phase, RuleSet, Transform};

pub const TA_MARBUTA: &str = "ة";
pub const HA: &str = "ه";
pub const ALIF_MAQSURA: &str = "ى";
pub const YA: &str = "ي";
pub const ALIF: &str = "ا";
pub const ALIF_HAMZA: &str = "أ";
pub const ALIF_HAMZA_BELOW: &str = "إ";
pub const TATWEEL: &str = "ـ";

/// Clitics short enough to fall under every length threshold.
const ALWAYS_ELIGIBLE: &[&str] = &["ل", "ب"];

const FEMININE_PLURAL_SUFFIXES: &[&str] = &["ات", "اتي", "اتك", "اته", "اتها", "اتنا", "اتكم", "اتهم"];
const FEMININE_PLURAL_EXCEPTIONS: &[&str] = &[
    "دة",
    "وصلة", // "links", not a plural of a feminine noun
];

const FEMININE_SUFFIXES: &[&str] = &[
    "تي", "تك", "ته", "تها", "تنا", "تكم", "تهم", "اني", "اتك", "اه", "اها", "انا", "اكم", "اهم",
];
const FEMININE_EXCEPTIONS: &[&str] = &["الة", "دة", "ودة", "تة", "وفة", "الأولة", "الحية", "حية"];

const END_YA_EXCEPTIONS: &[&str] = &[
    "علي", // usually the name, not the preposition
    "وعلي",
];
const END_HA_EXCEPTIONS: &[&str] = &["ة", "فيه", "وفيه", "منه", "ومنه", "قبله", "الأمه", "أمه"];
const HAMZA_EXCEPTIONS: &[&str] = &["إل", "أل", "أسم", "كأن", "كإن", "دإ"];

const NOUN_PREFIXES: &[(&str, &[&str])] = &[
    (
        "ل",
        &[
            "ب", "ل", "في", "عن", "علي", "دي", "ده", "هو", "هي", "ان", "كان", "او",
            "انو", "ما", "بن", "ال", "مع", "من", "ين", "كل", "كن", "يل", "اد", "قى",
            "بس", "غايه", "لو", "يس", "ون", "دا", "يا", "له", "أن",
        ],
    ),
    (
        "ال",
        &[
            "لي", "عن", "علي", "دي", "ده", "هو", "هي", "كان", "او", "عنو", "مع", "ل",
            "ب", "مش", "أم", "لما", "لا", "مان", "تي",
        ],
    ),
    (
        "لل",
        &["بس"],
    ),
];

const NOUN_SUFFIXES: &[(&str, &[&str])] = &[
    (
        "ين",
        &[
            "ب", "ل", "سن", "السن", "من", "في", "عن", "علي", "الى", "او", "ال", "مع",
            "ما", "بعد", "مد", "يم", "أم", "حس", "لا", "دا", "مش", "حسن", "علم",
        ],
    ),
];

const VERB_PREFIXES: &[(&str, &[&str])] = &[
    (
        "ما",
        &[
            "من", "عن", "علي", "الى", "ان", "لو", "ما", "ال", "ل", "ب", "ده", "لا", "يو",
            "دا", "يا",
        ],
    ),
    (
        "ح",
        &[
            "من", "في", "عن", "علي", "الى", "ان", "ده", "دش", "سن", "عد", "ما", "ال",
            "اسم", "مل", "ل", "ب", "ين", "صل", "اول", "يا", "زب", "كم", "رب", "سب", "لم",
            "كتر", "كبر", "لو", "مد", "سين", "بس", "حسن", "ير", "يه", "تي", "سنين",
            "سنه",
        ],
    ),
    (
        "ا",
        &[
            "من", "في", "عن", "علي", "الى", "ان", "جي", "هو", "هم", "اللي", "كان", "بعد",
            "لي", "ما", "ال", "سم", "حد", "ل", "ب", "كل", "صل", "بو", "نت", "مش", "لا",
            "مر", "صر", "نا", "شهر", "بق", "سر", "با", "بس", "مين", "دا", "حمد", "دار",
            "داره", "ولاد", "حب", "قبلوا", "لأ",
        ],
    ),
    (
        "ت",
        &[
            "من", "في", "عن", "علي", "الى", "ان", "جي", "بعد", "ال", "ل", "ب", "مش",
            "يم", "حت", "بق", "اع", "حسين", "حب", "حد", "قبل", "حسن", "علم", "صغير",
            "مثل", "مارس",
        ],
    ),
    (
        "ي",
        &[
            "من", "في", "عن", "علي", "الى", "ان", "دا", "جي", "بعد", "بن", "انو", "ال",
            "ل", "ب", "مش", "بق", "وم", "لا", "مين", "ها", "تيم", "ناير", "حب", "حي",
            "حد", "حسن", "قبل", "مارس", "علم", "مثل",
        ],
    ),
    (
        "ن",
        &[
            "من", "في", "عن", "علي", "الى", "ان", "دا", "بعد", "جي", "او", "ما", "ال",
            "سم", "ل", "ب", "يل", "صر", "ااس", "سب", "بق", "اس", "فس", "يو", "جم", "شر",
            "قل", "حب", "قبل", "علم", "جيب",
        ],
    ),
];

const VERB_SUFFIXES: &[(&str, &[&str])] = &[
    (
        "ش",
        &[
            "هو", "هي", "دي", "أو", "إن", "ال", "يا", "جي", "لو", "عا", "عي", "الجي",
            "حب", "الحب", "حد",
        ],
    ),
    (
        "ني",
        &[
            "ال", "مع", "تا", "حس", "أولا", "دي", "دا",
        ],
    ),
    (
        "وا",
        &[
            "ال", "مش", "بق", "دا", "ل", "مارس",
        ],
    ),
    (
        "و",
        &[
            "دي", "ما", "ال", "زي", "هي", "ل", "ب", "الجي", "بق", "دا", "عمر", "ماي",
            "فرنسا", "مارس", "لأ",
        ],
    ),
    (
        "ت",
        &[
            "في", "أو", "من", "عن", "فيا", "اخ", "تح", "بق", "صل", "بن", "أن", "إن",
            "لس", "دا", "عز", "ما", "هو", "هي", "مش", "قبل", "علم", "هم", "مثل", "مارس",
        ],
    ),
];

const INDETERMINATE_PREFIXES: &[(&str, &[&str])] = &[
    (
        "و",
        &[
            "أو", "صل", "يا", "لاد", "قت", "عمر", "يه", "جد", "جدي", "جده", "جه", "صف",
            "وده", "لي",
        ],
    ),
    (
        "ب",
        &[
            "دي", "يا", "ودي", "في", "عن", "علي", "الى", "ان", "دا", "هو", "ال", "من",
            "عد", "عده", "هي", "ل", "ب", "ما", "ين", "اب", "لاد", "قي", "نا", "نت", "كر",
            "حر", "در", "تاع", "يه", "تيه", "ها", "ابا", "ده", "ودا", "ول", "حب", "حبك",
            "نجيب", "طول", "طوله",
        ],
    ),
];

const INDETERMINATE_SUFFIXES: &[(&str, &[&str])] = &[
    (
        "ي",
        &[
            "سن", "لأ", "السن", "إلل", "هو", "هم", "عل", "ال", "إل", "سم", "أو", "ما",
            "هي", "بن", "مش", "ومش", "تان", "حوال", "حت", "كبر", "لا", "لو", "حسن", "بق",
            "صدق", "دا", "قدر", "وما", "بس", "مصر", "المصر", "يوسف", "اليوسف", "محمد",
            "المحمد", "محمود", "المحمود", "أحمد", "الأحمد", "حسين", "الحسين", "إنجليز",
            "الإنجليز", "فؤاد", "إبراهيم", "الإبراهيم", "حال", "الحال", "عباس", "العباس",
            "إسماعيل", "الإسماعيل", "إيران", "الإيران", "عرب", "العرب", "دين", "الدين",
            "حلم", "فوز", "سنو", "رئيس", "الرئيس", "عالم", "العالم", "روح", "علم",
            "العلم", "حرب", "الحرب", "إسلام", "الإسلام", "قبط", "القبط", "عسكر",
            "العسكر", "شعب", "الشعب", "مركز", "المركز", "مسيح", "المسيح", "رومان",
            "الرومان", "فارس", "الفارس", "رياض", "الرياض", "يونان", "اليونان",
        ],
    ),
    (
        "ك",
        &[
            "ب", "بس", "إللي", "دي", "دا", "ودي", "ده", "بن", "ما", "هي", "هو", "لين",
            "مل", "لو", "شر", "الأمري", "هنا", "حر", "أمري", "فؤاد", "حسن",
        ],
    ),
    (
        "كي",
        &[
            "هي", "الأمري", "أمري", "وال",
        ],
    ),
    (
        "ه",
        &[
            "دي", "ودي", "سن", "السن", "ده", "ودا", "دا", "ال", "أو", "حد", "وحد", "بن",
            "هو", "هي", "كد", "مر", "جه", "حاج", "مدين", "اللغ", "اى", "صل", "قاهر",
            "لست", "القاهر", "جامع", "الجامع", "لجامع", "للجامع", "ثور", "أم", "كلم",
            "لس", "حمل", "شوي", "مد", "فتر", "يا", "حي", "الحي", "بس", "سعاد", "مسرحي",
            "عملي", "كلي", "وفا", "مش", "جمهوري", "حيا", "مدرس", "سيد", "ما", "حسن",
            "نجيب", "فريد", "مارس", "زكى", "شخصي", "الشخصي", "أمين", "الأمين", "جميل",
            "الجميل", "صالح", "الصالح", "خامس", "الخامس", "حسب", "الحسب",
        ],
    ),
    (
        "ها",
        &[
            "ودا", "إنت", "مارس",
        ],
    ),
    (
        "نا",
        &[
            "دي", "ودي", "يا", "ما", "مع", "أو", "دا", "لأ",
        ],
    ),
    (
        "كم",
        &[
            "او", "انو", "تح", "حا", "حسن",
        ],
    ),
    (
        "هم",
        &[
            "لا", "ودا", "بس", "سيد", "ما", "لأ",
        ],
    ),
];
const IRREGULAR_JOINS: &[(&str, &str)] = &[
    ("ع", "على"),
    ("هما", "هم"),
    ("مثلا", "مثل"),
    ("أنت", "إنت"),
    ("دا", "ده"),
    ("كدا", "كده"),
    ("كن", "كان"),
    ("قل", "قال"),
    ("شف", "شاف"),
    ("شوف", "شاف"),
    ("كون", "كان"),
    ("رح", "راح"),
    ("روح", "راح"),
    ("قول", "قال"),
    ("مات", "موت"),
    ("جيت", "جه"),
    ("جم", "جه"),
    ("جت", "جه"),
    ("يجي", "جه"),
    ("تجي", "جه"),
    ("جيب", "جاب"),
    ("بقت", "بقي"),
    ("بقو", "بقي"),
    ("بقوا", "بقي"),
    ("يبقي", "بقي"),
    ("يصل", "وصل"),
    ("اصل", "وصل"),
    ("اتوفى", "وفى"),
    ("عاش", "عيش"),
    ("مصريين", "مصر"),
    ("مواليد", "مولود"),
    ("احداث", "حدث"),
    ("بلاد", "بلد"),
    ("السياس", "سياسه"),
    ("سياسى", "سياسه"),
    ("مدن", "مدينه"),
    ("كتب", "كتاب"),
    ("مصادر", "مصدر"),
    ("تصانيف", "تصنيف"),
    ("ولاد", "ولد"),
    ("مناطق", "منطق"),
    ("عصور", "عصر"),
    ("إنسان", "ناس"),
    ("أيام", "يوم"),
    ("رجال", "رجل"),
    ("أماكن", "مكان"),
    ("أحوال", "حال"),
    ("حروف", "حرف"),
    ("حقوق", "حق"),
    ("أحداث", "حديث"),
    ("أعمال", "عمل"),
    ("أقباط", "قبط"),
    ("مماليك", "مملوك"),
    ("سنين", "سنه"),
    ("إيد", "يد"),
    ("وفيات", "وفاه"),
    ("الإسلام", "اسلام"),
    ("بإن", "إن"),
    ("معا", "مع"),
    ("إبن", "بن"),
    ("حدش", "أحد"),
    ("علشان", "عشان"),
    ("ويكيپيديا", "يكيبيديا"),
    ("لينكات", "لينك"),
    ("الأولاني", "أولانى"),
];

impl RuleSet {
    /// The default phase sequence for Egyptian Arabic.
    ///
    /// Order matters: a form absorbed in one phase is gone for every later
    /// phase, so reordering changes the resulting clusters.
    pub fn egyptian() -> Self {
        RuleSet {
            phases: vec![
                Phase::affix(
                    "feminine-plural",
                    0,
                    vec![
                        AffixRule::new(
                            replace_ending(TA_MARBUTA),
                            plain(Marker::FemininePlural, FEMININE_PLURAL_SUFFIXES),
                        )
                        .with_exceptions(FEMININE_PLURAL_EXCEPTIONS.iter().copied()),
                    ],
                ),
                Phase::affix(
                    "feminine-singular",
                    0,
                    vec![
                        AffixRule::new(
                            replace_ending(TA_MARBUTA),
                            plain(Marker::FeminineSingular, FEMININE_SUFFIXES),
                        )
                        .with_exceptions(FEMININE_EXCEPTIONS.iter().copied()),
                    ],
                ),
                Phase::affix(
                    "allograph-endings",
                    0,
                    vec![
                        AffixRule::new(
                            Transform::Suffix { fold: None },
                            plain(Marker::Allograph, &[TATWEEL]),
                        ),
                        AffixRule::new(
                            replace_ending(YA),
                            plain(Marker::Allograph, &[ALIF_MAQSURA]),
                        )
                        .with_exceptions(END_YA_EXCEPTIONS.iter().copied()),
                        AffixRule::new(
                            replace_ending(HA),
                            plain(Marker::Allograph, &[TA_MARBUTA]),
                        )
                        .with_exceptions(END_HA_EXCEPTIONS.iter().copied()),
                    ],
                ),
                Phase::affix(
                    "allograph-hamza",
                    0,
                    vec![
                        AffixRule::new(
                            Transform::ReplaceAll {
                                with: ALIF.to_string(),
                            },
                            plain(Marker::Allograph, &[ALIF_HAMZA, ALIF_HAMZA_BELOW]),
                        )
                        .with_exceptions(HAMZA_EXCEPTIONS.iter().copied()),
                    ],
                ),
                Phase::affix(
                    "indeterminate",
                    2,
                    vec![
                        AffixRule::new(
                            Transform::Prefix,
                            guarded(Marker::IndeterminatePrefix, INDETERMINATE_PREFIXES),
                        ),
                        AffixRule::new(
                            folded_suffix(),
                            guarded(Marker::IndeterminateSuffix, INDETERMINATE_SUFFIXES),
                        ),
                    ],
                ),
                Phase::affix(
                    "verbs",
                    2,
                    vec![
                        AffixRule::new(
                            Transform::Prefix,
                            guarded(Marker::VerbPrefix, VERB_PREFIXES),
                        ),
                        AffixRule::new(
                            folded_suffix(),
                            guarded(Marker::VerbSuffix, VERB_SUFFIXES),
                        ),
                    ],
                ),
                Phase::affix(
                    "nouns",
                    2,
                    vec![
                        AffixRule::new(
                            Transform::Prefix,
                            guarded(Marker::NounPrefix, NOUN_PREFIXES),
                        ),
                        AffixRule::new(
                            folded_suffix(),
                            guarded(Marker::NounSuffix, NOUN_SUFFIXES),
                        ),
                    ],
                ),
                Phase::irregular(
                    "irregular-joins",
                    IRREGULAR_JOINS
                        .iter()
                        .map(|(from, to)| JoinPair::new(*from, *to))
                        .collect(),
                ),
            ],
            always_eligible: ALWAYS_ELIGIBLE.iter().map(|w| w.to_string()).collect(),
            ending_fixup: Some(EndingFixup {
                from: YA.to_string(),
                to: ALIF_MAQSURA.to_string(),
            }),
        }
    }
}

fn replace_ending(ending: &str) -> Transform {
    Transform::ReplaceEnding {
        ending: ending.to_string(),
    }
}

// Suffixed forms are spelled with ya where the bare word ends in alif maqsura.
fn folded_suffix() -> Transform {
    Transform::Suffix {
        fold: Some(Fold {
            from: ALIF_MAQSURA.to_string(),
            to: YA.to_string(),
        }),
    }
}

fn plain(marker: Marker, affixes: &[&str]) -> Vec<Affix> {
    affixes.iter().map(|text| Affix::new(*text, marker)).collect()
}

fn guarded(marker: Marker, table: &[(&str, &[&str])]) -> Vec<Affix> {
    table
        .iter()
        .map(|(text, exceptions)| {
            Affix::new(*text, marker).with_exceptions(exceptions.iter().copied())
        })
        .collect()
}
