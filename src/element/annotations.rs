use std::sync::{Arc, LazyLock};

static EMPTY: LazyLock<Arc<[Arc<str>]>> = LazyLock::new(|| Arc::from([]));

/// Ordered annotation sequence attached to an element.
///
/// Duplicates and the empty sequence are allowed, order is significant, and
/// the sequence participates in element equality and hashing. Cloning is an
/// `Arc` bump; the empty sequence is a shared singleton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotations {
	texts: Arc<[Arc<str>]>,
}

impl Annotations {
	/// The shared empty annotation sequence.
	pub fn empty() -> Self {
		Self { texts: EMPTY.clone() }
	}

	/// Build an annotation sequence from the given texts, in order.
	pub fn from_texts<I, S>(texts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		let texts: Vec<Arc<str>> = texts.into_iter().map(Into::into).collect();
		if texts.is_empty() {
			return Self::empty();
		}
		Self { texts: texts.into() }
	}

	/// Return a new sequence with `texts` appended after the existing ones.
	pub fn appending<I, S>(&self, texts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		let mut combined: Vec<Arc<str>> = self.texts.to_vec();
		combined.extend(texts.into_iter().map(Into::into));
		if combined.is_empty() {
			return Self::empty();
		}
		Self { texts: combined.into() }
	}

	/// Number of annotations.
	pub fn len(&self) -> usize {
		self.texts.len()
	}

	/// True when no annotations are present.
	pub fn is_empty(&self) -> bool {
		self.texts.is_empty()
	}

	/// True when `text` occurs anywhere in the sequence.
	pub fn contains(&self, text: &str) -> bool {
		self.texts.iter().any(|t| t.as_ref() == text)
	}

	/// Iterate the annotation texts in order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.texts.iter().map(AsRef::as_ref)
	}

	/// Annotation texts as a slice.
	pub fn as_slice(&self) -> &[Arc<str>] {
		&self.texts
	}
}

impl Default for Annotations {
	fn default() -> Self {
		Self::empty()
	}
}

impl<S: Into<Arc<str>>> FromIterator<S> for Annotations {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self::from_texts(iter)
	}
}
