//! Authored response text.
//!
//! Each table is scanned in order; the first entry whose keywords occur in
//! the lower-cased query wins, otherwise the default is used.

/// (substrings, template) pairs; any substring selects the template
pub(crate) type TemplateTable = &'static [(&'static [&'static str], &'static str)];

pub(crate) fn pick(table: TemplateTable, default: &'static str, query: &str) -> &'static str {
    table
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| query.contains(k)))
        .map(|(_, template)| *template)
        .unwrap_or(default)
}

// ================= Motivation =================

pub(crate) const MOTIVATION: TemplateTable = &[
    (
        &["exercise", "workout"],
        "💪 **Exercise Motivation:** Movement is medicine! Even 10 minutes of walking can boost your mood and energy. Start with what feels good and build from there. Your body will thank you!",
    ),
    (
        &["habit", "routine"],
        "🔥 **Habit Building:** You don't need motivation to start - you need discipline to continue! Think about your future self. What would they thank you for doing today?",
    ),
    (
        &["sleep", "bedtime"],
        "😴 **Sleep Motivation:** Quality sleep is the foundation of everything else. Create a relaxing bedtime routine and stick to it. Your mind and body will reward you!",
    ),
    (
        &["diet", "food"],
        "🥗 **Healthy Eating:** Focus on adding good foods rather than restricting. Start your day with protein, stay hydrated, and remember - progress, not perfection!",
    ),
];

pub(crate) const MOTIVATION_DEFAULT: &str = "🌟 **General Motivation:** Every step forward, no matter how small, is progress. Your future self is watching and cheering you on! What will you do today to make them proud?";

// ================= Guidance =================

pub(crate) const GUIDANCE: TemplateTable = &[
    (
        &["start", "begin"],
        "🚀 **Getting Started:** The best way to start is to start small! Choose one habit and commit to it for just 2 minutes a day. Once that becomes automatic, gradually increase the time.",
    ),
    (
        &["stuck", "struggle"],
        "🔄 **Overcoming Obstacles:** It's normal to struggle! When you feel stuck, break your goal into smaller pieces. What's the tiniest step you can take right now?",
    ),
    (
        &["consistency", "maintain"],
        "⏰ **Building Consistency:** Consistency beats perfection every time! Focus on showing up daily, even if it's just for a few minutes. Small daily actions compound into massive results.",
    ),
    (
        &["goal", "target"],
        "🎯 **Goal Setting:** Break big goals into tiny, actionable steps. What's the smallest thing you can do today that moves you forward? Remember, progress is progress, no matter how small!",
    ),
];

pub(crate) const GUIDANCE_DEFAULT: &str = "💡 **Personal Guidance:** Based on your current progress, I recommend focusing on one area at a time. What feels most important to you right now?";

pub(crate) const EXERCISE_TIPS: &[&str] = &[
    "Start with 10 minutes and gradually increase",
    "Find an exercise buddy for accountability",
    "Schedule exercise at your most energetic time of day",
];

pub(crate) const STUDY_TIPS: &[&str] = &[
    "Use the Pomodoro technique (25 min focus, 5 min break)",
    "Create a dedicated study space",
    "Review material within 24 hours for better retention",
];

pub(crate) const DECLINING_TIP: &str = "Consider reducing your goals temporarily to rebuild momentum";
pub(crate) const LONG_STREAK_TIP: &str = "Great job on your streak! Consider adding a new habit";

// ================= Reminder =================

pub(crate) const REMINDER_NO_HABIT: &str = "⏰ What would you like me to remind you about? Exercise, meditation, reading, planning or health habits like water and sleep - tell me the habit and I'll pick the best time for it.";

// ================= Analysis =================

pub(crate) const ANALYSIS_IMPROVING: &str = "📈 **Progress Analysis:** Great news! You're on an upward trend. Your consistency is paying off, and you're building momentum. Keep up the excellent work!";
pub(crate) const ANALYSIS_DECLINING: &str = "📉 **Progress Analysis:** I notice you've been struggling lately. This is completely normal and happens to everyone. Let's identify what's changed and get you back on track.";
pub(crate) const ANALYSIS_STABLE: &str = "📊 **Progress Analysis:** Your progress has been stable. This is actually a good foundation! Now let's work on building momentum and taking it to the next level.";

pub(crate) const KEEP_GOING: &str = "Keep up the great work!";
pub(crate) const FOCUS_ON_CONSISTENCY: &str = "Focus on consistency over perfection";

// ================= Habit Formation =================

pub(crate) const HABIT_FORMATION: TemplateTable = &[
    (
        &["morning", "start"],
        "🌅 **Morning Habits:** Morning routines set the tone for your entire day! Start with something simple like making your bed or drinking water. Small wins create momentum.",
    ),
    (
        &["evening", "night"],
        "🌙 **Evening Habits:** Evening routines help you wind down and prepare for tomorrow. Try reading, journaling, or gentle stretching. Consistency in sleep schedule is key!",
    ),
    (
        &["exercise", "workout"],
        "🏃 **Exercise Habits:** Movement habits work best when scheduled at the same time daily. Start with just 5-10 minutes and gradually increase. Your body will thank you!",
    ),
];

pub(crate) const HABIT_FORMATION_DEFAULT: &str = "🔧 **Habit Formation:** The key to building habits is starting small and being consistent. Choose one habit, commit to 2 minutes daily, and build from there!";

pub(crate) const MORNING_STEPS: &[&str] = &[
    "Start by waking up just 15 minutes earlier",
    "Begin with making your bed - it's a quick win",
    "Add a glass of water to start your day hydrated",
    "Include 2 minutes of gentle stretching",
    "Write down your top 3 priorities for the day",
];

pub(crate) const EVENING_STEPS: &[&str] = &[
    "Dim your lights 1 hour before bedtime",
    "Create a relaxing bedtime routine",
    "Avoid screens 30 minutes before sleep",
    "Prepare your clothes for tomorrow",
    "Practice gratitude by writing 3 good things",
];

pub(crate) const EXERCISE_STEPS: &[&str] = &[
    "Start with just 5 minutes of movement",
    "Schedule exercise at your most energetic time",
    "Prepare everything the night before",
    "Find an exercise buddy for accountability",
    "Track your progress to see improvement",
];

pub(crate) const GENERAL_STEPS: &[&str] = &[
    "Choose ONE habit to focus on initially",
    "Start with just 2 minutes daily",
    "Use habit stacking to link to existing routines",
    "Track your progress consistently",
    "Celebrate every small win and milestone",
];

// ================= General =================

pub(crate) const GENERAL_DEFAULT: &str = "💭 **Personal Reflection:** That's an interesting question! While I'm processing it, take a moment to reflect on what you really want to achieve. Sometimes the best answers come from within.";

pub(crate) const GREETING: &str = "👋 **Greeting:** Hello! I'm here to help you build better habits and achieve your goals. What would you like to work on today?";
pub(crate) const SUPPORT: &str = "🤝 **Support:** I'm here to help! I can assist with habit building, motivation, goal setting, progress tracking, and much more. What specific area do you need help with?";
pub(crate) const GRATITUDE: &str = "🙏 **Gratitude:** You're welcome! I'm glad I could help. Remember, you're doing great work on yourself, and that's something to be proud of!";
pub(crate) const STATUS: &str = "😊 **Status:** I'm doing well and ready to help you! How are you feeling today? What's on your mind regarding your habits and goals?";
