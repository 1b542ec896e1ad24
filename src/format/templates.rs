//! Structural contracts injected after the agent's own instructions.

/// Placeholder replaced with the current ISO-8601 timestamp in the JSON template.
pub const GENERATED_AT_PLACEHOLDER: &str = "{{generated_at}}";

pub const REWRITE_PERFECTLY: &str = r#"
Your entire output MUST be a single, refined piece of text, directly transformed from the user's input.
The goal is to improve the user's original text by making it:
*   Clearer, more articulate, and precise.
*   More impactful, persuasive, or engaging.
*   Stylistically superior and grammatically flawless.
*   If the user's input is very brief and implies a common goal (e.g., "modern minimalist design"), elaborate slightly to make it a more complete instruction or statement.
*   Preserve the core intent of the user's input.

CRITICAL: Your output MUST consist ONLY of the rewritten text. NO preambles, NO postambles, NO explanations.
Example of transformation expected:
User Input: "make website better for users"
Your Output: "Enhance the website's user experience by improving navigation intuitiveness, optimizing page load speeds, and ensuring content clarity and accessibility.""#;

pub const CLAUDE_STYLE: &str = r#"
Your entire output MUST be formatted in the "Claude AI Style" (Hierarchical Sectioned List):
1. Your output should be structured into logical sections based on the content you need to generate from the user's input.
2. Optionally, you can begin with an ALL-CAPS main title for the entire output on its own line.
3. Each distinct section MUST start with a section heading on its own line: '# Section Title'.
4. Under each section heading, list specific details or items: ' - Detail/Item content'.
5. Do NOT include any text that is not part of the main title (if used), section headings, or hyphenated items.

Example Structure to Populate:
OVERALL DOCUMENT TITLE (e.g., PROJECT PLAN, CONTENT OUTLINE)
# Section 1: [Infer or generate title based on user input]
 - [Detail 1 related to user input and Section 1]
 - [Detail 2 related to user input and Section 1]
# Section 2: [Infer or generate title based on user input]
 - [Item A related to user input and Section 2]
 - [Item B related to user input and Section 2]
... (add more sections and items as needed to represent the user's input) ..."#;

pub const JSON: &str = r#"
Your entire output MUST be a single, valid JSON object and nothing else. No markdown.
Populate the following JSON structure with content derived from the user's input. Adapt keys and values as logically necessary.

Example Structure to Populate:
{
  "title": "[A concise title reflecting the user's input/request]",
  "summary": "[A brief summary of the user's core input or the generated content]",
  "details": {
    "main_points": [
      "[First main point derived from user input]",
      "[Second main point derived from user input]"
    ],
    "additional_info": {
      "key_1": "[Value 1 relevant to user input]",
      "key_2": "[Value 2 relevant to user input]"
    }
  },
  "metadata": {
    "generated_at": "{{generated_at}}",
    "format_requested": "JSON"
  }
}
// If the user's input is a list of items, you might use an array for "details".
// If it's a request to summarize, "summary" would be the main output.
// Be flexible but stick to valid JSON."#;

pub const PSEUDO_DSL: &str = r#"
Your entire output MUST be formatted in a "Pseudo Domain Specific Language (DSL)" style.
Use specific uppercase keywords followed by values or blocks of text. Populate the structure based on the user's input.

Example Structure to Populate (adapt keywords if needed):
TITLE: [Title derived from user input]
OBJECTIVE: [Objective or goal based on user input]
INPUT_SUMMARY: [Briefly summarize the user's raw input here]

SECTION: [Section 1 Title - e.g., KEY_ELEMENTS]
  - ITEM: [First item/detail for this section, from user input]
  - ITEM: [Second item/detail for this section, from user input]

SECTION: [Section 2 Title - e.g., CONSIDERATIONS]
  - NOTE: [A note or consideration based on user input]

CONCLUSION: [Concluding statement or summary, derived from user input]
Do NOT include any other text, explanation, or preamble."#;

pub const DETAILED_TEXT: &str = r#"
Your entire output MUST be a well-structured, detailed block of text directly addressing or elaborating on the user's input.
Use clear paragraphs. You can use markdown for headings (##, ###), bold (**text**), italics (*text*), and bullet points (* or -) if it enhances readability and structure.
The goal is a comprehensive, ready-to-use text.
Do NOT include any conversational filler, explanations of your process, or meta-commentary unless it's part of a direct answer to a question.

Example of how to structure content (adapt based on user input):
## [Main Title/Topic Derived from User Input]

[Opening paragraph elaborating on the core idea from the user input.]

### [Sub-heading 1 - e.g., Key Aspects]
*   [First key aspect related to user input, elaborated.]
*   [Second key aspect related to user input, elaborated.]

### [Sub-heading 2 - e.g., Further Details or Implications]
[Paragraph discussing further details or implications based on the user input.]

[Concluding paragraph or summary.]"#;
