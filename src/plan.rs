//! Deterministic study-plan synthesis.
//!
//! Allocates a day budget across three phases (fundamentals, building
//! skills, advanced practice) and renders a fixed daily template with
//! periodic checkpoint quizzes during phase 2. Day numbers across the
//! emitted phases always sum to exactly the requested total.

use regex::Regex;

/// Fallback day count when a request carries no usable duration.
pub const DEFAULT_PLAN_DAYS: u32 = 7;

const DIVIDER_WIDTH: usize = 50;

/// Split a total day budget into (fundamentals, intermediate, advanced).
///
/// Fundamentals gets 30% and intermediate 40% (floored, minimum one day
/// each), with both clamped so the running total never exceeds `days`;
/// for a one-day plan intermediate collapses to zero. Advanced is the
/// remainder and may be zero, in which case its section is omitted.
pub fn allocate_phases(days: u32) -> (u32, u32, u32) {
    let fundamentals = ((days as f64 * 0.3) as u32).max(1).min(days);
    let intermediate = ((days as f64 * 0.4) as u32)
        .max(1)
        .min(days - fundamentals);
    let advanced = days - fundamentals - intermediate;
    (fundamentals, intermediate, advanced)
}

/// Render a complete study plan for `topic` spanning `days` days.
pub fn study_plan(topic: &str, days: u32) -> String {
    let days = days.max(1);
    let (fundamentals, intermediate, advanced) = allocate_phases(days);
    let divider = "─".repeat(DIVIDER_WIDTH);

    let mut plan = format!("📚 {}-Day Study Plan: {}\n{}\n\n", days, topic, divider);
    let mut current_day = 1u32;

    plan.push_str("PHASE 1: FUNDAMENTALS\n\n");
    for _ in 0..fundamentals {
        plan.push_str(&format!("📅 Day {}: Core Concepts\n", current_day));
        plan.push_str("• Learn basic terminology and definitions\n");
        plan.push_str("• Understand foundational principles\n");
        plan.push_str("• Study real-world applications\n");
        plan.push_str("• Practice: Complete 3-5 beginner exercises\n");
        plan.push_str("⏱ Time: 2-3 hours\n\n");
        current_day += 1;
    }

    if intermediate > 0 {
        plan.push_str("PHASE 2: BUILDING SKILLS\n\n");
        for _ in 0..intermediate {
            plan.push_str(&format!("📅 Day {}: Intermediate Topics\n", current_day));
            plan.push_str("• Apply concepts to practical problems\n");
            plan.push_str("• Work through guided examples\n");
            plan.push_str("• Understand common patterns\n");
            plan.push_str("• Practice: Build a small project\n");
            plan.push_str("⏱ Time: 2-3 hours\n\n");
            current_day += 1;

            // Quiz checkpoint every 3rd cumulative day
            if current_day % 3 == 0 && current_day <= days {
                plan.push_str(&format!(
                    "🧪 Checkpoint Quiz: Test Days {}-{}\n\n",
                    current_day - 2,
                    current_day - 1
                ));
            }
        }
    }

    if advanced > 0 {
        plan.push_str("PHASE 3: ADVANCED PRACTICE\n\n");
        for _ in 0..advanced {
            plan.push_str(&format!("📅 Day {}: Advanced Techniques\n", current_day));
            plan.push_str("• Master complex concepts\n");
            plan.push_str("• Integrate multiple topics\n");
            plan.push_str("• Work on real-world scenarios\n");
            plan.push_str("• Practice: Complete a comprehensive project\n");
            plan.push_str("⏱ Time: 3-4 hours\n\n");
            current_day += 1;
        }
    }

    plan.push_str(&format!("{}\n", divider));
    plan.push_str("💡 QUICK STUDY TIPS\n\n");
    plan.push_str("1. 🍅 Use Pomodoro: 25 min focus, 5 min break\n");
    plan.push_str("2. 📝 Take notes in your own words\n");
    plan.push_str("3. 🔄 Review previous day before starting\n");
    plan.push_str("4. 💻 Practice > Theory - build projects\n");
    plan.push_str("5. 👥 Join study groups or forums\n");
    plan.push_str("6. 😴 Get good sleep for retention\n");
    plan.push_str("7. 🎯 Set daily goals and track progress\n\n");

    plan.push_str(&format!("{}\n", divider));
    plan.push_str(&format!("🎯 Goal: Build strong foundation in {}\n", topic));
    plan.push_str("📊 Track your progress daily!\n");
    plan.push_str("🚀 You've got this!\n");

    plan
}

/// Pull the topic and day count out of a free-form planner prompt.
///
/// Recognizes `"<N>-day"` for the duration (default
/// [`DEFAULT_PLAN_DAYS`]) and `"for learning: <topic>"` or `"for: <topic>"`
/// (case-insensitive, up to end of line) for the topic (default
/// `"Your Topic"`).
pub fn parse_plan_request(prompt: &str) -> (String, u32) {
    let days = Regex::new(r"(\d+)-day")
        .ok()
        .and_then(|re| re.captures(prompt))
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|&d| d > 0)
        .unwrap_or(DEFAULT_PLAN_DAYS);

    let topic = Regex::new(r"(?i)for learning: (.+?)(?:\n|$)")
        .ok()
        .and_then(|re| re.captures(prompt))
        .or_else(|| {
            Regex::new(r"(?i)for: (.+?)(?:\n|$)")
                .ok()
                .and_then(|re| re.captures(prompt))
        })
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Your Topic".to_string());

    (topic, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_headers(plan: &str) -> Vec<u32> {
        plan.lines()
            .filter_map(|l| l.strip_prefix("📅 Day "))
            .filter_map(|l| l.split(':').next())
            .filter_map(|n| n.trim().parse().ok())
            .collect()
    }

    #[test]
    fn test_allocation_seven_days() {
        assert_eq!(allocate_phases(7), (2, 2, 3));
    }

    #[test]
    fn test_allocation_one_day_clamps() {
        // intermediate collapses rather than going negative on advanced
        assert_eq!(allocate_phases(1), (1, 0, 0));
    }

    #[test]
    fn test_allocation_two_days() {
        assert_eq!(allocate_phases(2), (1, 1, 0));
    }

    #[test]
    fn test_allocation_ten_days() {
        assert_eq!(allocate_phases(10), (3, 4, 3));
    }

    #[test]
    fn test_allocation_always_sums_to_total() {
        for days in 1..=60 {
            let (f, i, a) = allocate_phases(days);
            assert_eq!(f + i + a, days, "bad split for {} days", days);
            assert!(f >= 1);
        }
    }

    #[test]
    fn test_plan_day_numbers_contiguous_and_complete() {
        let plan = study_plan("Linear Algebra", 7);
        assert_eq!(day_headers(&plan), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!plan.contains("Day 8"));
    }

    #[test]
    fn test_plan_phase_sections() {
        let plan = study_plan("Rust", 7);
        assert!(plan.contains("PHASE 1: FUNDAMENTALS"));
        assert!(plan.contains("PHASE 2: BUILDING SKILLS"));
        assert!(plan.contains("PHASE 3: ADVANCED PRACTICE"));
        assert!(plan.contains("7-Day Study Plan: Rust"));
    }

    #[test]
    fn test_single_day_plan_omits_later_phases() {
        let plan = study_plan("Chemistry", 1);
        assert_eq!(day_headers(&plan), vec![1]);
        assert!(!plan.contains("PHASE 2"));
        assert!(!plan.contains("PHASE 3"));
        assert!(plan.contains("QUICK STUDY TIPS"));
    }

    #[test]
    fn test_checkpoint_in_ten_day_plan() {
        // fundamentals=3, so phase 2 covers days 4-7; the cumulative
        // counter hits a multiple of 3 after day 5
        let plan = study_plan("Statistics", 10);
        assert!(plan.contains("🧪 Checkpoint Quiz: Test Days 4-5"));
    }

    #[test]
    fn test_no_checkpoint_in_seven_day_plan() {
        // phase 2 covers days 3-4; the counter never lands on a multiple of 3
        let plan = study_plan("Statistics", 7);
        assert!(!plan.contains("Checkpoint Quiz"));
    }

    #[test]
    fn test_closing_block_always_present() {
        for days in [1, 3, 14] {
            let plan = study_plan("Biology", days);
            assert!(plan.contains("7. 🎯 Set daily goals and track progress"));
            assert!(plan.contains("🎯 Goal: Build strong foundation in Biology"));
            assert!(plan.contains("🚀 You've got this!"));
        }
    }

    #[test]
    fn test_parse_plan_request_full() {
        let (topic, days) =
            parse_plan_request("Create a 14-day study plan for learning: Organic Chemistry");
        assert_eq!(topic, "Organic Chemistry");
        assert_eq!(days, 14);
    }

    #[test]
    fn test_parse_plan_request_for_variant() {
        let (topic, days) = parse_plan_request("Make a 5-day plan for: French verbs");
        assert_eq!(topic, "French verbs");
        assert_eq!(days, 5);
    }

    #[test]
    fn test_parse_plan_request_defaults() {
        let (topic, days) = parse_plan_request("help me study");
        assert_eq!(topic, "Your Topic");
        assert_eq!(days, DEFAULT_PLAN_DAYS);
    }

    #[test]
    fn test_parse_plan_request_case_insensitive() {
        let (topic, _) = parse_plan_request("A 3-day plan FOR LEARNING: calculus");
        assert_eq!(topic, "calculus");
    }
}
