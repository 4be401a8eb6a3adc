//! The page the demo converts.

use selecta_dom::{Document, DomError, OptionSpec};

pub fn sample_form() -> Result<Document, DomError> {
    let mut doc = Document::new();
    let body = doc.body();

    doc.add_label(body, "fruit", "Fruit")?;
    doc.add_select(
        body,
        Some("fruit"),
        &["selecta"],
        [
            OptionSpec::new("apple", "Apple"),
            OptionSpec::new("apricot", "Apricot"),
            OptionSpec::new("banana", "Banana"),
            OptionSpec::new("blueberry", "Blueberry"),
            OptionSpec::new("cherry", "Cherry"),
            OptionSpec::new("durian", "Durian").disabled(),
            OptionSpec::new("elderberry", "Elderberry"),
        ],
    )?;

    doc.add_label(body, "size", "Size")?;
    doc.add_select(
        body,
        Some("size"),
        &["selecta"],
        [
            OptionSpec::new("s", "Small"),
            OptionSpec::new("m", "Medium").selected(),
            OptionSpec::new("l", "Large"),
        ],
    )?;

    doc.add_label(body, "country", "Country")?;
    doc.add_select(
        body,
        Some("country"),
        &["selecta"],
        [
            "Austria", "Belgium", "Bulgaria", "Croatia", "Cyprus", "Czechia", "Denmark",
            "Estonia", "Finland", "France", "Germany", "Greece", "Hungary", "Ireland",
        ]
        .into_iter()
        .map(|name| OptionSpec::new(name.to_lowercase(), name)),
    )?;

    let note = doc.create_element("p");
    doc.set_text(note, "Click anywhere else to dismiss an open list.")?;
    doc.append_child(body, note)?;

    // Left alone: no `selecta` class.
    doc.add_select(body, Some("plain"), &[], [OptionSpec::new("x", "Untouched")])?;

    Ok(doc)
}
