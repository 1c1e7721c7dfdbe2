//! Common source code fixtures for tests.

use once_cell::sync::Lazy;

/// A BEM-style SCSS module with three levels of suffix nesting.
pub const CARD_SCSS: &str = r#".card {
  padding: 8px;

  &-header {
    display: flex;

    &-title {
      font-weight: bold;
    }
  }

  &.is-active {
    border: 1px solid;
  }

  & .icon {
    width: 16px;
  }
}
"#;

/// A plain CSS module.
pub const BUTTON_CSS: &str = r#".button {
  color: red;
}

.button:hover,
.button-primary.large {
  color: blue;
}
"#;

/// A component using the plain CSS module.
pub const BUTTON_TSX: &str = r#"import styles from './Button.module.css';

export function Button({ variant }) {
  return (
    <button className={`${styles.button} ${styles[variant]}`}>
      <span className={styles.butten} />
      <span className={styles['button-primary']} />
    </button>
  );
}
"#;

/// The small workspace most IDE tests run against.
pub static BUTTON_WORKSPACE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("/ws/src/Button.module.css", BUTTON_CSS),
        ("/ws/src/Button.tsx", BUTTON_TSX),
        ("/ws/src/Card.module.scss", CARD_SCSS),
    ]
});
